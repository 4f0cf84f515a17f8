//! Row model and schema for persisted watch-orders.

use diesel::prelude::*;

use crate::domain::{FilterProperties, OrderId, OwnerId, Price, WatchOrder};
use crate::error::{Error, Result};

diesel::table! {
    watch_orders (id) {
        id -> Text,
        owner -> Text,
        filters -> Text,
        trigger_price -> Text,
        floor_price -> Nullable<Text>,
        position -> Integer,
    }
}

/// One persisted watch-order.
///
/// Prices are stored as wei strings, filters as a JSON document;
/// `position` preserves list iteration order across whole-list
/// replacements.
#[derive(Debug, Queryable, Insertable)]
#[diesel(table_name = watch_orders)]
pub struct WatchOrderRow {
    pub id: String,
    pub owner: String,
    pub filters: String,
    pub trigger_price: String,
    pub floor_price: Option<String>,
    pub position: i32,
}

impl WatchOrderRow {
    /// Serialize a domain order at a list position.
    pub fn from_order(order: &WatchOrder, position: i32) -> Result<Self> {
        Ok(Self {
            id: order.id.to_string(),
            owner: order.owner.to_string(),
            filters: serde_json::to_string(&order.filters)?,
            trigger_price: order.trigger_price.wei().to_string(),
            floor_price: order.floor_price.map(|p| p.wei().to_string()),
            position,
        })
    }

    /// Deserialize back into a domain order.
    pub fn into_order(self) -> Result<WatchOrder> {
        let filters: FilterProperties = serde_json::from_str(&self.filters)?;
        Ok(WatchOrder {
            id: OrderId::parse(&self.id).map_err(|e| Error::Parse(e.to_string()))?,
            owner: OwnerId::from(self.owner),
            filters,
            trigger_price: Price::from_wei_str(&self.trigger_price)?,
            floor_price: self
                .floor_price
                .as_deref()
                .map(Price::from_wei_str)
                .transpose()?,
        })
    }
}
