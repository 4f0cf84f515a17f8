//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for sensitive values like `WALLET_PRIVATE_KEY`.

use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, Result};

// Submodules
mod chain;
mod discord;
mod engine;
mod logging;
mod marketplace;

// Re-export all public types from submodules
pub use chain::{ChainConfig, WalletConfig};
pub use discord::DiscordConfig;
pub use engine::EngineConfig;
pub use logging::LoggingConfig;
pub use marketplace::MarketplaceConfig;

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database path holding the watch-order list.
    pub database_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: "floorsniper.db".into(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub marketplace: MarketplaceConfig,
    pub chain: ChainConfig,
    pub wallet: WalletConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
    pub engine: EngineConfig,
    pub discord: DiscordConfig,
}

impl Config {
    /// Load configuration from a TOML file and the environment.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        // Load private key from environment variable (never from config
        // file for security)
        config.wallet.private_key = std::env::var("WALLET_PRIVATE_KEY").ok();

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.marketplace.graphql_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "marketplace.graphql_url",
            }
            .into());
        }
        if self.store.database_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "store.database_url",
            }
            .into());
        }
        if self.engine.min_tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engine.min_tick_interval_ms",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.engine.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engine.page_size",
                reason: "must be positive".into(),
            }
            .into());
        }
        if !self.engine.dry_run {
            if self.chain.rpc_url.is_empty() {
                return Err(ConfigError::MissingField {
                    field: "chain.rpc_url",
                }
                .into());
            }
            if self.chain.ws_url.is_empty() {
                return Err(ConfigError::MissingField { field: "chain.ws_url" }.into());
            }
        }
        Ok(())
    }

    /// Initialize logging from the embedded logging section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn empty_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.engine.min_tick_interval_ms, 500);
        assert!(config.discord.webhook_url.is_none());
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let config: Config = toml::from_str("[engine]\nmin_tick_interval_ms = 0\n").unwrap();
        assert!(config.validate().is_err());
    }
}
