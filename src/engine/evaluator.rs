//! Per-order evaluation against live marketplace state.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{DomainError, Evaluation, WatchOrder};
use crate::port::{AuctionKind, MarketQuery, SortOrder};

/// Default page size for trigger queries.
///
/// The trigger only ever needs the cheapest match, so a small page is
/// enough; a few extra rows cover listings racing away mid-query.
pub const DEFAULT_PAGE_SIZE: u64 = 5;

/// Evaluates watch-orders against freshly fetched marketplace listings.
#[derive(Clone)]
pub struct Evaluator {
    market: Arc<dyn MarketQuery>,
    page_size: u64,
}

impl Evaluator {
    /// Create an evaluator over the given marketplace client.
    #[must_use]
    pub fn new(market: Arc<dyn MarketQuery>, page_size: u64) -> Self {
        Self { market, page_size }
    }

    /// Evaluate one order against the current marketplace state.
    ///
    /// A compile error in the order's stored criteria is returned to the
    /// caller, which reports it as an order defect and leaves the order
    /// in place. A transient query failure is indistinguishable from "no
    /// listings" at this layer: both yield [`Evaluation::NoMatch`] and no
    /// state change, so the next tick retries naturally.
    pub async fn evaluate(&self, order: &WatchOrder) -> Result<Evaluation, DomainError> {
        let criteria = order.filters.compile()?;

        let page = match self
            .market
            .query(&criteria, 0, self.page_size, SortOrder::PriceAsc, AuctionKind::Sale)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "Marketplace query failed; treating as no match");
                return Ok(Evaluation::NoMatch);
            }
        };

        let Some(cheapest) = page.cheapest() else {
            debug!(order_id = %order.id, "No listings match criteria");
            return Ok(Evaluation::NoMatch);
        };

        // Trigger decisions use the freshly fetched price, never the
        // stored floor; ties on price keep the first result.
        let floor = cheapest.current_price;

        if order.trigger_price >= floor {
            return Ok(Evaluation::Triggered {
                listing: cheapest.clone(),
                floor,
            });
        }

        if order.floor_price != Some(floor) {
            return Ok(Evaluation::FloorChanged(floor));
        }

        Ok(Evaluation::NoMatch)
    }
}
