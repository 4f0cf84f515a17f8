//! Execution coordination: claim, settle, reconcile.
//!
//! The claim step is the de-duplication point for the whole system.
//! Removing the order from the store *before* submitting the purchase
//! means no concurrent or subsequent tick can see it, so at most one
//! execution attempt can ever be in flight per order. A failed
//! settlement compensates by re-inserting the order; a crash strictly
//! between claim and reconcile is the accepted data-loss window.
//!
//! The store only promises last-write-wins on whole-list replacement,
//! and settlement tasks run concurrently with the tick loop, so every
//! in-process mutation re-reads the list under one shared lock. External
//! writers (the command interface) remain last-write-wins.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::domain::{ExecutionOutcome, MarketListing, OrderId, Price, WatchOrder};
use crate::error::Result;
use crate::port::notifier::{Event, ExecutionEvent, NotifierRegistry};
use crate::port::{OrderStore, PurchaseSubmitter};

/// Drives the claim -> execute -> reconcile protocol for triggered
/// orders, and owns every in-process mutation of the order store.
///
/// Cloning is cheap; all fields are shared handles. The coordinator
/// performs no retries of its own - a failed settlement is terminal for
/// the attempt and the order re-enters evaluation via the next tick.
#[derive(Clone)]
pub struct Coordinator {
    store: Arc<dyn OrderStore>,
    submitter: Arc<dyn PurchaseSubmitter>,
    notifiers: Arc<NotifierRegistry>,
    /// Serializes read-modify-replace cycles within this process.
    mutation: Arc<Mutex<()>>,
}

impl Coordinator {
    /// Create a coordinator over the given store and submitter.
    #[must_use]
    pub fn new(
        store: Arc<dyn OrderStore>,
        submitter: Arc<dyn PurchaseSubmitter>,
        notifiers: Arc<NotifierRegistry>,
    ) -> Self {
        Self {
            store,
            submitter,
            notifiers,
            mutation: Arc::new(Mutex::new(())),
        }
    }

    /// Claim an order: remove it from the store, making it invisible to
    /// every other evaluation pass.
    ///
    /// The list is re-read immediately before the removal rather than
    /// taken from any cached copy, so an order the user deleted mid-pass
    /// is simply not found. Returns the freshly stored order, or `None`
    /// if the id is already gone.
    pub async fn claim(&self, id: OrderId) -> Result<Option<WatchOrder>> {
        let _guard = self.mutation.lock().await;

        let mut orders = self.store.list().await?;
        let Some(pos) = orders.iter().position(|o| o.id == id) else {
            return Ok(None);
        };
        let order = orders.remove(pos);
        self.store.replace(orders).await?;
        Ok(Some(order))
    }

    /// Persist a freshly observed floor price for an order.
    ///
    /// Returns the previous floor on success, or `None` if the order
    /// disappeared between evaluation and this write.
    pub async fn update_floor(&self, id: OrderId, floor: Price) -> Result<Option<Option<Price>>> {
        let _guard = self.mutation.lock().await;

        let mut orders = self.store.list().await?;
        let Some(stored) = orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        let previous = stored.floor_price;
        stored.floor_price = Some(floor);
        self.store.replace(orders).await?;
        Ok(Some(previous))
    }

    /// Run the full execution protocol for a triggered order, awaited.
    ///
    /// `floor` is the price observed by the evaluation that triggered
    /// this attempt; a compensated order carries it back into the store.
    pub async fn attempt(
        &self,
        id: OrderId,
        listing: &MarketListing,
        floor: Price,
    ) -> Result<ExecutionOutcome> {
        let Some(claimed) = self.claim(id).await? else {
            info!(order_id = %id, "Order already claimed or removed; skipping execution");
            return Ok(ExecutionOutcome::AlreadyClaimed);
        };
        Ok(self.settle(claimed.with_floor(floor), listing.clone()).await)
    }

    /// Settle an already-claimed order in a spawned task so a slow chain
    /// never blocks the tick loop for the remaining orders.
    pub fn spawn_settle(&self, claimed: WatchOrder, listing: MarketListing) {
        let coordinator = self.clone();
        tokio::spawn(async move {
            coordinator.settle(claimed, listing).await;
        });
    }

    /// Submit the purchase and reconcile the outcome.
    async fn settle(&self, claimed: WatchOrder, listing: MarketListing) -> ExecutionOutcome {
        info!(
            order_id = %claimed.id,
            asset = %listing.asset_id,
            price = %listing.current_price,
            "Submitting purchase"
        );

        let outcome = match self.submitter.submit(&listing).await {
            Ok(receipt) => {
                info!(
                    order_id = %claimed.id,
                    tx = %receipt.tx_hash,
                    price = %receipt.settled_price,
                    "Purchase confirmed"
                );
                ExecutionOutcome::Purchased(receipt)
            }
            Err(reason) => {
                warn!(order_id = %claimed.id, reason = %reason, "Purchase failed; compensating");
                if let Err(e) = self.compensate(claimed.clone()).await {
                    // The one store failure we cannot paper over: the
                    // order was claimed and the re-insert did not stick.
                    error!(
                        order_id = %claimed.id,
                        error = %e,
                        "Compensation failed; order is lost and must be recreated"
                    );
                }
                ExecutionOutcome::Failed(reason)
            }
        };

        // Best-effort reporting; never affects the claim/compensate
        // decision above.
        self.notifiers.notify_all(Event::ExecutionCompleted(
            ExecutionEvent::from_outcome(&claimed, &listing.asset_id, &outcome),
        ));

        outcome
    }

    /// Re-insert a claimed order after a failed settlement.
    ///
    /// Re-reads the list immediately before the insert; if the id
    /// somehow reappeared in the meantime the insert is skipped to keep
    /// the at-most-once invariant.
    async fn compensate(&self, order: WatchOrder) -> Result<()> {
        let _guard = self.mutation.lock().await;

        let mut orders = self.store.list().await?;
        if orders.iter().any(|o| o.id == order.id) {
            warn!(order_id = %order.id, "Order already present during compensation; not duplicating");
            return Ok(());
        }
        orders.push(order);
        self.store.replace(orders).await
    }
}
