//! Engine tuning configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::engine::{EngineSettings, DEFAULT_PAGE_SIZE};

/// Engine tuning knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum interval between accepted chain-head notifications, in
    /// milliseconds.
    pub min_tick_interval_ms: u64,
    /// Listings fetched per trigger query.
    pub page_size: u64,
    /// Evaluate and notify but never claim or buy.
    pub dry_run: bool,
    /// Emit a notification on every floor move (noisy).
    pub notify_floor_moves: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_tick_interval_ms: 500,
            page_size: DEFAULT_PAGE_SIZE,
            dry_run: false,
            notify_floor_moves: false,
        }
    }
}

impl From<&EngineConfig> for EngineSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            min_tick_interval: Duration::from_millis(config.min_tick_interval_ms),
            page_size: config.page_size,
            dry_run: config.dry_run,
            notify_floor_moves: config.notify_floor_moves,
        }
    }
}
