//! Core domain types: watch-orders, criteria, prices, listings.
//!
//! Everything here is exchange- and transport-agnostic; adapters map
//! wire formats into these types at the boundary.

pub mod criteria;
pub mod error;
pub mod evaluation;
pub mod id;
pub mod listing;
pub mod money;
pub mod order;

pub use criteria::{Criteria, FilterProperties};
pub use error::DomainError;
pub use evaluation::{Evaluation, ExecutionOutcome, PurchaseReceipt};
pub use id::{AssetId, OrderId, OwnerId};
pub use listing::{ListingPage, MarketListing};
pub use money::Price;
pub use order::WatchOrder;
