//! Notifier port for outcome reporting.
//!
//! Notification delivery is best-effort and decoupled from state
//! transitions: a failed delivery never rolls back a claim or a
//! compensation.

use crate::domain::{
    AssetId, ExecutionOutcome, MarketListing, OrderId, OwnerId, Price, WatchOrder,
};

/// Events that can trigger notifications.
#[derive(Debug, Clone)]
pub enum Event {
    /// A watch-order's trigger condition was met.
    Triggered(TriggerEvent),
    /// An execution attempt finished (purchased or compensated).
    ExecutionCompleted(ExecutionEvent),
    /// The observed floor price for an order moved.
    FloorChanged(FloorEvent),
    /// An order's stored criteria are malformed and need a human.
    OrderDefect(DefectEvent),
}

/// Trigger condition satisfied.
#[derive(Debug, Clone)]
pub struct TriggerEvent {
    /// The triggering order.
    pub order_id: OrderId,
    /// Who to tell.
    pub owner: OwnerId,
    /// The listing chosen for execution.
    pub asset_id: AssetId,
    /// Price the listing can settle at.
    pub listing_price: Price,
    /// The order's trigger threshold.
    pub trigger_price: Price,
}

impl TriggerEvent {
    /// Build a trigger event from an order and its chosen listing.
    #[must_use]
    pub fn new(order: &WatchOrder, listing: &MarketListing) -> Self {
        Self {
            order_id: order.id,
            owner: order.owner.clone(),
            asset_id: listing.asset_id.clone(),
            listing_price: listing.current_price,
            trigger_price: order.trigger_price,
        }
    }
}

/// Execution attempt finished.
#[derive(Debug, Clone)]
pub struct ExecutionEvent {
    /// The order the attempt belonged to.
    pub order_id: OrderId,
    /// Who to tell.
    pub owner: OwnerId,
    /// The asset the attempt settled against.
    pub asset_id: AssetId,
    /// Whether the purchase confirmed.
    pub success: bool,
    /// Whether the order went back into the store for the next tick.
    pub compensated: bool,
    /// Human-readable detail (tx hash or failure reason).
    pub details: String,
}

impl ExecutionEvent {
    /// Build an execution event from a coordinator outcome.
    #[must_use]
    pub fn from_outcome(
        order: &WatchOrder,
        asset_id: &AssetId,
        outcome: &ExecutionOutcome,
    ) -> Self {
        let (success, compensated, details) = match outcome {
            ExecutionOutcome::Purchased(receipt) => (
                true,
                false,
                format!("tx {} at {}", receipt.tx_hash, receipt.settled_price),
            ),
            ExecutionOutcome::Failed(reason) => (false, true, reason.to_string()),
            ExecutionOutcome::AlreadyClaimed => {
                (false, false, "order already claimed elsewhere".to_string())
            }
        };
        Self {
            order_id: order.id,
            owner: order.owner.clone(),
            asset_id: asset_id.clone(),
            success,
            compensated,
            details,
        }
    }
}

/// Floor price moved for an order's criteria.
#[derive(Debug, Clone)]
pub struct FloorEvent {
    /// The order whose floor moved.
    pub order_id: OrderId,
    /// Who to tell.
    pub owner: OwnerId,
    /// Floor before this tick, if one was ever observed.
    pub previous: Option<Price>,
    /// Freshly observed floor.
    pub floor: Price,
}

/// Stored criteria failed to compile.
#[derive(Debug, Clone)]
pub struct DefectEvent {
    /// The defective order. It stays in the store untouched.
    pub order_id: OrderId,
    /// Who needs to fix or remove it.
    pub owner: OwnerId,
    /// The compile error, human readable.
    pub reason: String,
}

/// Trait for notification handlers.
///
/// Implementations must be thread-safe and must not block: slow
/// transports should queue the event and deliver from a background
/// task.
pub trait Notifier: Send + Sync {
    /// Handle an event. Must return quickly.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
#[derive(Default)]
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all registered notifiers.
    pub fn notify_all(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A notifier that logs events via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        use tracing::{info, warn};
        match event {
            Event::Triggered(e) => {
                info!(
                    order_id = %e.order_id,
                    asset = %e.asset_id,
                    listing_price = %e.listing_price,
                    trigger_price = %e.trigger_price,
                    "Trigger condition met"
                );
            }
            Event::ExecutionCompleted(e) => {
                info!(
                    order_id = %e.order_id,
                    asset = %e.asset_id,
                    success = e.success,
                    compensated = e.compensated,
                    details = %e.details,
                    "Execution completed"
                );
            }
            Event::FloorChanged(e) => {
                info!(
                    order_id = %e.order_id,
                    previous = ?e.previous.map(|p| p.to_string()),
                    floor = %e.floor,
                    "Floor price moved"
                );
            }
            Event::OrderDefect(e) => {
                warn!(
                    order_id = %e.order_id,
                    owner = %e.owner,
                    reason = %e.reason,
                    "Order has defective criteria"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting(Arc<AtomicUsize>);

    impl Notifier for Counting {
        fn notify(&self, _event: Event) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn registry_broadcasts_to_all_notifiers() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut registry = NotifierRegistry::new();
        registry.register(Box::new(Counting(count.clone())));
        registry.register(Box::new(Counting(count.clone())));

        registry.notify_all(Event::OrderDefect(DefectEvent {
            order_id: OrderId::new(),
            owner: OwnerId::from("user"),
            reason: "bad bucket".into(),
        }));

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
