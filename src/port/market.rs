//! Marketplace query port.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Criteria, ListingPage};
use crate::error::Result;

/// Sort order for marketplace queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum SortOrder {
    /// Cheapest listing first. The trigger path always queries this way.
    PriceAsc,
    /// Most expensive listing first.
    PriceDesc,
    /// Most recently listed first.
    Latest,
}

/// Which auction mechanism to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum AuctionKind {
    /// Fixed-price or declining-price sales that settle immediately.
    Sale,
    /// Every listed asset regardless of sale state.
    All,
}

/// Read access to marketplace listings.
///
/// A transport failure is an `Err`, distinguished from an `Ok` page
/// with zero results; the evaluator collapses both into a no-op but the
/// distinction matters for logging.
#[async_trait]
pub trait MarketQuery: Send + Sync {
    /// Query listings matching `criteria`, paginated and sorted.
    async fn query(
        &self,
        criteria: &Criteria,
        from: u64,
        size: u64,
        sort: SortOrder,
        auction: AuctionKind,
    ) -> Result<ListingPage>;
}
