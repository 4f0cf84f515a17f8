//! Ports: trait boundaries between the engine and its collaborators.
//!
//! The engine core only ever talks to these traits; concrete transports
//! live under [`crate::adapter`].

pub mod heads;
pub mod market;
pub mod notifier;
pub mod purchase;
pub mod store;

pub use heads::ChainHead;
pub use market::{AuctionKind, MarketQuery, SortOrder};
pub use notifier::{
    DefectEvent, Event, ExecutionEvent, FloorEvent, LogNotifier, Notifier, NotifierRegistry,
    NullNotifier, TriggerEvent,
};
pub use purchase::{PurchaseResult, PurchaseSubmitter};
pub use store::OrderStore;
