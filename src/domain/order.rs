//! Watch-orders: standing instructions to buy below a trigger price.

use serde::{Deserialize, Serialize};

use crate::domain::criteria::FilterProperties;
use crate::domain::id::{OrderId, OwnerId};
use crate::domain::money::Price;

/// A user's standing instruction to buy an asset matching criteria once
/// the floor drops to the trigger price.
///
/// The order store is the single source of truth for whether an order is
/// still active: an id exists there at most once, and removal (claiming)
/// is the only mechanism that suspends re-evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchOrder {
    /// Opaque identifier, assigned at creation, immutable.
    pub id: OrderId,
    /// Requester, for notification routing. Immutable.
    pub owner: OwnerId,
    /// The filter dimensions this order watches.
    pub filters: FilterProperties,
    /// Buy when the current floor price is at or below this amount.
    pub trigger_price: Price,
    /// Last observed floor price for the compiled criteria.
    ///
    /// Mutated only by the evaluator and used purely for display and
    /// change notifications; trigger decisions always use the freshly
    /// fetched price.
    #[serde(default)]
    pub floor_price: Option<Price>,
}

impl WatchOrder {
    /// Create a new watch-order with a fresh id and no observed floor.
    #[must_use]
    pub fn new(owner: OwnerId, filters: FilterProperties, trigger_price: Price) -> Self {
        Self {
            id: OrderId::new(),
            owner,
            filters,
            trigger_price,
            floor_price: None,
        }
    }

    /// Copy of this order carrying a newly observed floor price.
    #[must_use]
    pub fn with_floor(&self, floor: Price) -> Self {
        Self {
            floor_price: Some(floor),
            ..self.clone()
        }
    }
}
