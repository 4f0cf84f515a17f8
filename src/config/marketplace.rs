//! Marketplace API configuration.

use serde::Deserialize;

/// Marketplace GraphQL endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketplaceConfig {
    /// GraphQL gateway URL for listing queries.
    pub graphql_url: String,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            graphql_url: "https://graphql.marketplace.roninchain.com/graphql".into(),
        }
    }
}
