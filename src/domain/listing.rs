//! Marketplace listings as immutable point-in-time snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::id::AssetId;
use crate::domain::money::Price;

/// A marketplace listing: an asset plus its current sale order.
///
/// The evaluator treats a listing as a snapshot valid only for the
/// instant it was fetched; the purchase submission settles against
/// exactly this snapshot and fails if the chain disagrees by then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketListing {
    /// The listed asset.
    pub asset_id: AssetId,
    /// Asset class, as reported by the marketplace.
    pub class: String,
    /// Price the listing can currently be settled at.
    pub current_price: Price,
    /// Seller address that signed the sale order.
    pub maker: String,
    /// When the sale order expires on chain.
    pub expires_at: DateTime<Utc>,
    /// Maker's order nonce at listing time.
    pub nonce: u64,
    /// Maker signature over the sale order, hex encoded.
    pub signature: String,
}

/// One page of sorted marketplace query results.
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Total matches for the criteria, across all pages.
    pub total: u64,
    /// The requested page, in query sort order.
    pub results: Vec<MarketListing>,
}

impl ListingPage {
    /// The cheapest listing on a price-ascending page.
    ///
    /// Ties keep the first result; the sort-stable query order makes
    /// "first wins" deterministic.
    #[must_use]
    pub fn cheapest(&self) -> Option<&MarketListing> {
        self.results.first()
    }
}
