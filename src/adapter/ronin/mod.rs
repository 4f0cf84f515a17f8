//! Chain adapters: head subscription and purchase settlement.
//!
//! Requires the `ronin` feature.

pub mod heads;
pub mod submitter;

pub use heads::HeadStream;
pub use submitter::RoninSubmitter;
