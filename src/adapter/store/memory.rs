//! In-memory order store for tests and ephemeral runs.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::WatchOrder;
use crate::error::Result;
use crate::port::OrderStore;

/// In-memory store holding the order list behind an `RwLock`.
///
/// Matches the whole-list read/replace contract of the persistent
/// store, including last-write-wins semantics under concurrent
/// replacement.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: RwLock<Vec<WatchOrder>>,
}

impl MemoryOrderStore {
    /// Create a new empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given orders.
    #[must_use]
    pub fn with_orders(orders: Vec<WatchOrder>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn list(&self) -> Result<Vec<WatchOrder>> {
        Ok(self.orders.read().clone())
    }

    async fn replace(&self, orders: Vec<WatchOrder>) -> Result<()> {
        *self.orders.write() = orders;
        Ok(())
    }
}
