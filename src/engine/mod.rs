//! The order trigger engine.
//!
//! One cooperative loop consumes chain-head notifications, debounces
//! them, and runs evaluation passes over the stored watch-orders. A pass
//! evaluates orders sequentially in store iteration order; a fault in
//! one order's evaluation never blocks the remaining orders. Triggered
//! orders are claimed inline (the de-duplication point) and settled in
//! spawned tasks that outlive the pass.

pub mod coordinator;
pub mod debounce;
pub mod evaluator;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub use coordinator::Coordinator;
pub use debounce::{GateState, TickGate};
pub use evaluator::{Evaluator, DEFAULT_PAGE_SIZE};

use crate::domain::{Evaluation, MarketListing, Price, WatchOrder};
use crate::port::notifier::{DefectEvent, Event, FloorEvent, TriggerEvent};
use crate::port::{ChainHead, MarketQuery, NotifierRegistry, OrderStore, PurchaseSubmitter};

/// Engine tuning knobs, decoupled from the config file format.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Minimum interval between accepted chain-head notifications.
    pub min_tick_interval: Duration,
    /// Listings fetched per trigger query.
    pub page_size: u64,
    /// Evaluate and notify, but never claim or buy.
    pub dry_run: bool,
    /// Emit a notification on every floor move (noisy).
    pub notify_floor_moves: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            min_tick_interval: Duration::from_millis(500),
            page_size: DEFAULT_PAGE_SIZE,
            dry_run: false,
            notify_floor_moves: false,
        }
    }
}

/// The chain-head-driven evaluation loop.
pub struct Engine {
    store: Arc<dyn OrderStore>,
    evaluator: Evaluator,
    coordinator: Coordinator,
    notifiers: Arc<NotifierRegistry>,
    gate: TickGate,
    settings: EngineSettings,
}

impl Engine {
    /// Wire an engine from its collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn OrderStore>,
        market: Arc<dyn MarketQuery>,
        submitter: Arc<dyn PurchaseSubmitter>,
        notifiers: Arc<NotifierRegistry>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            evaluator: Evaluator::new(market, settings.page_size),
            coordinator: Coordinator::new(store.clone(), submitter, notifiers.clone()),
            store,
            notifiers,
            gate: TickGate::new(settings.min_tick_interval),
            settings,
        }
    }

    /// Consume chain-head notifications until the channel closes.
    ///
    /// Passes run serially: notifications accepted while a pass is in
    /// flight drain from the channel afterwards and collapse into at
    /// most one follow-up pass, never one pass per notification.
    pub async fn run(mut self, mut heads: mpsc::Receiver<ChainHead>) {
        while let Some(head) = heads.recv().await {
            if !self.gate.accept() {
                debug!(block = head.number, "Duplicate head suppressed");
                continue;
            }

            debug!(block = head.number, "Evaluation pass starting");
            self.run_pass().await;

            loop {
                let mut pending = false;
                while let Ok(extra) = heads.try_recv() {
                    if self.gate.accept() {
                        pending = true;
                    } else {
                        debug!(block = extra.number, "Duplicate head suppressed");
                    }
                }
                if !pending {
                    break;
                }
                debug!("Coalesced follow-up pass starting");
                self.run_pass().await;
            }
        }

        info!("Head stream closed; engine stopping");
    }

    /// Run one evaluation pass over every stored order.
    pub async fn run_pass(&self) {
        let orders = match self.store.list().await {
            Ok(orders) => orders,
            Err(e) => {
                warn!(error = %e, "Could not read order store; skipping pass");
                return;
            }
        };

        for order in orders {
            self.evaluate_one(order).await;
        }
    }

    async fn evaluate_one(&self, order: WatchOrder) {
        match self.evaluator.evaluate(&order).await {
            Err(defect) => {
                // Permanent order defect: tell the owner, leave the
                // order in place for a human to fix or remove.
                self.notifiers.notify_all(Event::OrderDefect(DefectEvent {
                    order_id: order.id,
                    owner: order.owner.clone(),
                    reason: defect.to_string(),
                }));
            }
            Ok(Evaluation::NoMatch) => {}
            Ok(Evaluation::FloorChanged(floor)) => {
                self.persist_floor(&order, floor).await;
            }
            Ok(Evaluation::Triggered { listing, floor }) => {
                self.handle_trigger(order, listing, floor).await;
            }
        }
    }

    async fn handle_trigger(&self, order: WatchOrder, listing: MarketListing, floor: Price) {
        // Persist the floor before trigger handling: a crash here loses
        // only the display value, never the order.
        if order.floor_price != Some(floor) {
            self.persist_floor(&order, floor).await;
        }

        self.notifiers
            .notify_all(Event::Triggered(TriggerEvent::new(&order, &listing)));

        if self.settings.dry_run {
            info!(
                order_id = %order.id,
                asset = %listing.asset_id,
                price = %listing.current_price,
                "Dry run; not executing"
            );
            return;
        }

        match self.coordinator.claim(order.id).await {
            Ok(Some(claimed)) => {
                self.coordinator
                    .spawn_settle(claimed.with_floor(floor), listing);
            }
            Ok(None) => {
                info!(order_id = %order.id, "Order gone before claim; skipping");
            }
            Err(e) => {
                // Claim never happened, so the order is intact and
                // simply re-evaluates next tick.
                warn!(order_id = %order.id, error = %e, "Claim failed; order left in place");
            }
        }
    }

    /// Persist a floor move through the coordinator's mutation lock.
    ///
    /// An order deleted externally between the evaluation and this write
    /// is skipped; the store stays the single source of truth.
    async fn persist_floor(&self, order: &WatchOrder, floor: Price) {
        match self.coordinator.update_floor(order.id, floor).await {
            Ok(Some(previous)) => {
                if self.settings.notify_floor_moves {
                    self.notifiers.notify_all(Event::FloorChanged(FloorEvent {
                        order_id: order.id,
                        owner: order.owner.clone(),
                        previous,
                        floor,
                    }));
                }
            }
            Ok(None) => {
                debug!(order_id = %order.id, "Order gone; floor update dropped");
            }
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "Could not persist floor update");
            }
        }
    }
}
