//! Floorsniper - NFT marketplace watch-order trigger engine.
//!
//! This crate watches an on-chain NFT marketplace for listings matching
//! user-defined criteria and automatically executes a purchase once the
//! floor price crosses an order's trigger threshold.
//!
//! # Architecture
//!
//! The engine is a single chain-head-driven evaluation loop over a
//! persistent list of watch-orders:
//!
//! - **`engine::debounce`** - Collapses near-simultaneous head
//!   notifications into one evaluation pass
//! - **`engine::evaluator`** - Compiles criteria, queries the
//!   marketplace price-ascending, decides trigger satisfaction
//! - **`engine::coordinator`** - Claims a triggered order (removal from
//!   the store is the de-duplication point), settles the purchase, and
//!   compensates by re-inserting the order on failure
//!
//! The guarantees are *at-most-one in-flight attempt per order* and
//! *no silent order loss*; exactly-once against external chain state is
//! not achievable with a non-transactional counterparty.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Watch-orders, criteria, prices, listings
//! - [`error`] - Error types for the crate
//! - [`port`] - Trait boundaries for store, marketplace, purchasing,
//!   and notification collaborators
//! - [`engine`] - The trigger engine itself
//! - [`adapter`] - SQLite store, GraphQL marketplace client, chain
//!   adapters (requires `ronin`), Discord notifier (requires `discord`)
//! - [`app`] - Application wiring (requires `ronin`)
//!
//! # Features
//!
//! - `ronin` - Chain-head subscription and on-chain settlement
//! - `discord` - Discord webhook notifications
//! - `testkit` - Scripted stub collaborators for tests

pub mod adapter;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod port;

#[cfg(feature = "ronin")]
pub mod app;

#[cfg(feature = "testkit")]
pub mod testkit;
