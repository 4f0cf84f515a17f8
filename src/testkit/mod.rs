//! Scripted stub collaborators for tests.
//!
//! Requires the `testkit` feature. Everything here implements the same
//! port traits the real adapters do, with scripted behavior and call
//! recording so tests can drive the engine deterministically.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;

use crate::domain::{
    AssetId, FilterProperties, ListingPage, MarketListing, OwnerId, Price, PurchaseReceipt,
    WatchOrder,
};
use crate::error::{Error, PurchaseError, Result};
use crate::port::notifier::{Event, Notifier};
use crate::port::{AuctionKind, MarketQuery, PurchaseResult, PurchaseSubmitter, SortOrder};

/// Build a watch-order with the given owner and whole-coin trigger price.
#[must_use]
pub fn watch_order(owner: &str, trigger_coin: &str) -> WatchOrder {
    WatchOrder::new(
        OwnerId::from(owner),
        FilterProperties::default(),
        Price::from_coin_str(trigger_coin).expect("valid trigger price"),
    )
}

/// Build a listing snapshot at the given whole-coin price.
#[must_use]
pub fn listing(asset: &str, price_coin: &str) -> MarketListing {
    MarketListing {
        asset_id: AssetId::from(asset),
        class: "beast".into(),
        current_price: Price::from_coin_str(price_coin).expect("valid listing price"),
        maker: "0x00000000000000000000000000000000000000aa".into(),
        expires_at: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        nonce: 1,
        signature: "0xfeed".into(),
    }
}

/// Wrap listings into a sorted result page.
#[must_use]
pub fn page(listings: Vec<MarketListing>) -> ListingPage {
    ListingPage {
        total: listings.len() as u64,
        results: listings,
    }
}

enum MarketFallback {
    Empty,
    Page(ListingPage),
    Fail,
}

/// Scripted marketplace: pops queued responses, then repeats a fallback.
pub struct StubMarket {
    queue: Mutex<VecDeque<Result<ListingPage>>>,
    fallback: MarketFallback,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubMarket {
    /// Marketplace with no listings, ever.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_fallback(MarketFallback::Empty)
    }

    /// Marketplace that returns the same page on every query.
    #[must_use]
    pub fn always(listings: Vec<MarketListing>) -> Self {
        Self::with_fallback(MarketFallback::Page(page(listings)))
    }

    /// Marketplace whose query transport always fails.
    #[must_use]
    pub fn failing() -> Self {
        Self::with_fallback(MarketFallback::Fail)
    }

    /// Marketplace that replays `responses` in order, then serves empty
    /// pages.
    #[must_use]
    pub fn sequence(responses: Vec<Result<ListingPage>>) -> Self {
        Self {
            queue: Mutex::new(responses.into()),
            fallback: MarketFallback::Empty,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Hold every query open for `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn with_fallback(fallback: MarketFallback) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of queries issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketQuery for StubMarket {
    async fn query(
        &self,
        _criteria: &crate::domain::Criteria,
        _from: u64,
        _size: u64,
        _sort: SortOrder,
        _auction: AuctionKind,
    ) -> Result<ListingPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(response) = self.queue.lock().pop_front() {
            return response;
        }

        match &self.fallback {
            MarketFallback::Empty => Ok(ListingPage::default()),
            MarketFallback::Page(page) => Ok(page.clone()),
            MarketFallback::Fail => Err(Error::Query("stub transport failure".into())),
        }
    }
}

/// Scripted purchase submitter with call recording.
///
/// Tracks the number of concurrently in-flight submissions so tests can
/// assert the at-most-one-claim property.
pub struct StubSubmitter {
    outcomes: Mutex<VecDeque<PurchaseResult>>,
    /// Assets that already settled; `single_copy` mode rejects repeats.
    settled: Mutex<HashSet<AssetId>>,
    single_copy: bool,
    delay: Option<Duration>,
    submitted: Mutex<Vec<AssetId>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubSubmitter {
    /// Submitter that confirms every purchase.
    #[must_use]
    pub fn succeeding() -> Self {
        Self::new(false)
    }

    /// Submitter where each asset can settle once; later attempts fail
    /// with listing-gone, like a real contended listing.
    #[must_use]
    pub fn single_copy() -> Self {
        Self::new(true)
    }

    /// Submitter that replays `outcomes` in order, then confirms.
    #[must_use]
    pub fn with_outcomes(outcomes: Vec<PurchaseResult>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            ..Self::new(false)
        }
    }

    /// Hold every submission open for `delay` before resolving.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn new(single_copy: bool) -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            settled: Mutex::new(HashSet::new()),
            single_copy,
            delay: None,
            submitted: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Assets submitted so far, in submission order.
    pub fn submitted(&self) -> Vec<AssetId> {
        self.submitted.lock().clone()
    }

    /// Highest number of submissions ever in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PurchaseSubmitter for StubSubmitter {
    async fn submit(&self, listing: &MarketListing) -> PurchaseResult {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.submitted.lock().push(listing.asset_id.clone());

        let result = if let Some(outcome) = self.outcomes.lock().pop_front() {
            outcome
        } else if self.single_copy && !self.settled.lock().insert(listing.asset_id.clone()) {
            Err(PurchaseError::ListingGone(format!(
                "asset {} already settled",
                listing.asset_id
            )))
        } else {
            Ok(PurchaseReceipt {
                tx_hash: format!("0xstub{}", listing.asset_id),
                settled_price: listing.current_price,
            })
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Notifier that records every event for later assertions.
#[derive(Clone, Default)]
pub struct CollectingNotifier {
    events: Arc<Mutex<Vec<Event>>>,
}

impl CollectingNotifier {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, event: Event) {
        self.events.lock().push(event);
    }
}
