//! Evaluation and execution outcome types.

use crate::domain::listing::MarketListing;
use crate::domain::money::Price;

/// What one evaluation tick concluded about a single watch-order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// No matching listings, or the query transiently failed. No state
    /// change either way; the next tick retries naturally.
    NoMatch,
    /// The observed floor moved but stayed above the trigger price.
    FloorChanged(Price),
    /// The cheapest matching listing is at or below the trigger price.
    Triggered {
        /// The listing to settle against, cheapest first-wins.
        listing: MarketListing,
        /// The floor observed in the same query, persisted before the
        /// execution attempt starts.
        floor: Price,
    },
}

/// Receipt for a confirmed on-chain purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    /// Settlement transaction hash.
    pub tx_hash: String,
    /// Price the purchase settled at.
    pub settled_price: Price,
}

/// Terminal result of one execution attempt.
///
/// A failed attempt has already been compensated (the order is back in
/// the store) by the time this value is produced.
#[derive(Debug, Clone)]
pub enum ExecutionOutcome {
    /// Purchase confirmed; the claimed order stays permanently removed.
    Purchased(PurchaseReceipt),
    /// Purchase failed; the order was re-inserted for the next tick.
    Failed(crate::error::PurchaseError),
    /// The order was already gone when the claim re-read the store -
    /// another actor removed it first. Nothing was attempted.
    AlreadyClaimed,
}
