//! SQLite order store implementation.
//!
//! Persistent storage for watch-orders using SQLite and Diesel ORM.
//! Both operations acquire a pooled connection for just the one call;
//! `replace` runs the delete-and-insert inside a single transaction so
//! readers never observe a half-replaced list.

use async_trait::async_trait;
use diesel::prelude::*;

use super::connection::DbPool;
use super::model::{watch_orders, WatchOrderRow};
use crate::domain::WatchOrder;
use crate::error::{Error, Result};
use crate::port::OrderStore;

/// SQLite-backed watch-order store.
pub struct SqliteOrderStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteOrderStore {
    /// Create a new SQLite order store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for SqliteOrderStore {
    async fn list(&self) -> Result<Vec<WatchOrder>> {
        let mut conn = self.pool.get().map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<WatchOrderRow> = watch_orders::table
            .order(watch_orders::position.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(WatchOrderRow::into_order).collect()
    }

    async fn replace(&self, orders: Vec<WatchOrder>) -> Result<()> {
        let rows = orders
            .iter()
            .enumerate()
            .map(|(i, order)| WatchOrderRow::from_order(order, i as i32))
            .collect::<Result<Vec<_>>>()?;

        let mut conn = self.pool.get().map_err(|e| Error::Connection(e.to_string()))?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(watch_orders::table).execute(conn)?;
            diesel::insert_into(watch_orders::table)
                .values(&rows)
                .execute(conn)?;
            Ok(())
        })
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }
}
