//! Tick debouncing for chain-head notifications.
//!
//! Chains frequently deliver several notifications for the same logical
//! head within milliseconds. The gate collapses such bursts: a
//! notification arriving sooner than the minimum interval after the last
//! accepted one is dropped without scheduling an evaluation pass.

use std::time::{Duration, Instant};

/// Observable gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// The next notification will be accepted.
    Idle,
    /// Inside the minimum interval; notifications are dropped.
    Suppressed,
}

/// Debounce gate over chain-head notifications.
///
/// Pass coalescing (at most one evaluation pass in flight, pending
/// notifications collapsing into a single follow-up) lives in the engine
/// loop; the gate only answers "is this notification a duplicate head".
#[derive(Debug)]
pub struct TickGate {
    min_interval: Duration,
    last_accepted: Option<Instant>,
}

impl TickGate {
    /// Create a gate with the given minimum interval between accepted
    /// notifications.
    #[must_use]
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_accepted: None,
        }
    }

    /// Current state as of `now`.
    #[must_use]
    pub fn state(&self, now: Instant) -> GateState {
        match self.last_accepted {
            Some(last) if now.duration_since(last) < self.min_interval => GateState::Suppressed,
            _ => GateState::Idle,
        }
    }

    /// Offer a notification arriving at `now`.
    ///
    /// Returns `true` if accepted (the caller schedules one evaluation
    /// pass and the gate re-arms), `false` if the notification fell
    /// inside the minimum interval and was dropped. The first
    /// notification ever offered is always accepted.
    pub fn accept_at(&mut self, now: Instant) -> bool {
        match self.state(now) {
            GateState::Suppressed => false,
            GateState::Idle => {
                self.last_accepted = Some(now);
                true
            }
        }
    }

    /// Offer a notification arriving now.
    pub fn accept(&mut self) -> bool {
        self.accept_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(500);

    #[test]
    fn first_notification_is_accepted() {
        let mut gate = TickGate::new(INTERVAL);
        assert!(gate.accept_at(Instant::now()));
    }

    #[test]
    fn burst_collapses_to_one_accept() {
        let mut gate = TickGate::new(INTERVAL);
        let base = Instant::now();

        assert!(gate.accept_at(base));
        assert!(!gate.accept_at(base + Duration::from_millis(1)));
        assert!(!gate.accept_at(base + Duration::from_millis(200)));
        assert!(!gate.accept_at(base + Duration::from_millis(499)));
    }

    #[test]
    fn slow_enough_gap_is_accepted_again() {
        let mut gate = TickGate::new(INTERVAL);
        let base = Instant::now();

        assert!(gate.accept_at(base));
        assert!(gate.accept_at(base + Duration::from_millis(500)));
        assert!(gate.accept_at(base + Duration::from_millis(1100)));
    }

    #[test]
    fn suppression_window_restarts_from_each_accept() {
        let mut gate = TickGate::new(INTERVAL);
        let base = Instant::now();

        assert!(gate.accept_at(base));
        assert!(gate.accept_at(base + Duration::from_millis(600)));
        // 599ms after the *second* accept, still suppressed.
        assert!(!gate.accept_at(base + Duration::from_millis(1199)));
    }

    #[test]
    fn state_reflects_suppression_window() {
        let mut gate = TickGate::new(INTERVAL);
        let base = Instant::now();
        assert_eq!(gate.state(base), GateState::Idle);

        gate.accept_at(base);
        assert_eq!(gate.state(base + Duration::from_millis(100)), GateState::Suppressed);
        assert_eq!(gate.state(base + Duration::from_millis(700)), GateState::Idle);
    }

    #[test]
    fn dropped_notifications_do_not_extend_the_window() {
        let mut gate = TickGate::new(INTERVAL);
        let base = Instant::now();

        assert!(gate.accept_at(base));
        assert!(!gate.accept_at(base + Duration::from_millis(400)));
        // The drop at 400ms must not push the window past base+500ms.
        assert!(gate.accept_at(base + Duration::from_millis(500)));
    }
}
