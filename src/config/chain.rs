//! Chain and wallet configuration.

use serde::Deserialize;

/// Chain connectivity and the marketplace gateway contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// HTTP RPC endpoint for transaction submission.
    pub rpc_url: String,
    /// WebSocket RPC endpoint for the head subscription.
    pub ws_url: String,
    /// Chain id used by the transaction signer.
    pub chain_id: u64,
    /// Marketplace gateway contract address.
    pub gateway_address: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.roninchain.com/rpc".into(),
            ws_url: "wss://api.roninchain.com/rpc/ws".into(),
            chain_id: 2020,
            gateway_address: "0xfff9ce5f71ca6178d3beecedb61e7eff1602950e".into(),
        }
    }
}

/// Wallet configuration.
///
/// The private key is never read from the config file; it is loaded
/// from the `WALLET_PRIVATE_KEY` environment variable after parsing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    #[serde(skip)]
    pub private_key: Option<String>,
}
