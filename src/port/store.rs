//! Order store port.
//!
//! The store holds the persistent list of active watch-orders behind
//! whole-list read/replace operations; no partial-update primitive is
//! assumed. Callers must re-read the list immediately before every
//! mutation instead of operating on a cached copy, so concurrent
//! external edits (a user deleting an order mid-pass) are never
//! clobbered beyond last-write-wins.

use async_trait::async_trait;

use crate::domain::WatchOrder;
use crate::error::Result;

/// Storage operations for watch-orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Read the full list of active orders, in store iteration order.
    async fn list(&self) -> Result<Vec<WatchOrder>>;

    /// Replace the full list of active orders.
    async fn replace(&self, orders: Vec<WatchOrder>) -> Result<()>;
}
