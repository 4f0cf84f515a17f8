//! Discord notification adapter.
//!
//! Requires the `discord` feature.

pub mod format;
pub mod notifier;

pub use notifier::{DiscordNotifier, DiscordSettings};
