//! App orchestration module.
//!
//! Wires configuration into adapters and runs the trigger engine until
//! the head stream ends or the process is signalled.
//!
//! Requires the `ronin` feature.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::adapter::marketplace::MarketplaceClient;
use crate::adapter::ronin::{HeadStream, RoninSubmitter};
use crate::adapter::store::{create_pool, run_migrations, SqliteOrderStore};
use crate::config::Config;
use crate::domain::MarketListing;
use crate::engine::{Engine, EngineSettings};
use crate::error::{PurchaseError, Result};
use crate::port::{
    LogNotifier, MarketQuery, NotifierRegistry, OrderStore, PurchaseResult, PurchaseSubmitter,
};

#[cfg(feature = "discord")]
use crate::adapter::discord::{DiscordNotifier, DiscordSettings};

/// Buffered head notifications between the stream and the engine.
const HEAD_CHANNEL_CAPACITY: usize = 64;

/// Main application struct.
pub struct App;

impl App {
    /// Run the trigger engine with the given configuration.
    ///
    /// Opens the store, loads the active watch-orders, wires the
    /// marketplace client, purchase submitter, and notifiers, then
    /// consumes chain heads until the stream closes.
    pub async fn run(config: Config) -> Result<()> {
        let pool = create_pool(&config.store.database_url)?;
        run_migrations(&pool)?;
        let store: Arc<dyn OrderStore> = Arc::new(SqliteOrderStore::new(pool));

        let orders = store.list().await?;
        info!(orders = orders.len(), "Watch-orders loaded");
        for order in &orders {
            info!(
                order_id = %order.id,
                owner = %order.owner,
                trigger = %order.trigger_price,
                "Watching"
            );
        }

        let market: Arc<dyn MarketQuery> =
            Arc::new(MarketplaceClient::new(config.marketplace.graphql_url.clone()));

        let mut notifiers = NotifierRegistry::new();
        notifiers.register(Box::new(LogNotifier));

        #[cfg(feature = "discord")]
        if let Some(webhook_url) = config.discord.webhook_url.clone() {
            notifiers.register(Box::new(DiscordNotifier::new(DiscordSettings {
                webhook_url,
                notify_triggers: config.discord.notify_triggers,
            })));
            info!("Discord notifications enabled");
        }

        let notifiers = Arc::new(notifiers);

        let mut settings = EngineSettings::from(&config.engine);

        let submitter: Arc<dyn PurchaseSubmitter> = match &config.wallet.private_key {
            Some(key) => {
                let submitter = RoninSubmitter::new(&config.chain, key)?;
                info!("Wallet configured - purchasing ENABLED");
                Arc::new(submitter)
            }
            None => {
                warn!("No wallet configured - forcing dry run");
                settings.dry_run = true;
                Arc::new(UnconfiguredSubmitter)
            }
        };

        if settings.dry_run {
            info!("Dry run: triggers are reported but never executed");
        }

        let heads = HeadStream::new(config.chain.ws_url.clone()).spawn(HEAD_CHANNEL_CAPACITY);

        Engine::new(store, market, submitter, notifiers, settings)
            .run(heads)
            .await;

        Ok(())
    }
}

/// Placeholder submitter for wallet-less runs.
///
/// Unreachable while dry run is forced on; if it is ever reached the
/// attempt fails and compensates like any other rejection.
struct UnconfiguredSubmitter;

#[async_trait]
impl PurchaseSubmitter for UnconfiguredSubmitter {
    async fn submit(&self, _listing: &MarketListing) -> PurchaseResult {
        Err(PurchaseError::Rejected("no wallet configured".into()))
    }
}
