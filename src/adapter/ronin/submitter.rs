//! Purchase settlement against the marketplace gateway contract.
//!
//! Submits `settleOrder` transactions using the listing snapshot
//! captured at evaluation time. Failures are classified into the
//! structured [`PurchaseError`] reasons the coordinator compensates on.

use std::str::FromStr;

use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::ProviderBuilder;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::sol;
use async_trait::async_trait;
use tracing::info;

use crate::config::ChainConfig;
use crate::domain::{MarketListing, PurchaseReceipt};
use crate::error::{ConfigError, PurchaseError, Result};
use crate::port::{PurchaseResult, PurchaseSubmitter};

// Marketplace gateway interface (minimal for settlement)
sol! {
    #[sol(rpc)]
    contract IMarketGateway {
        function settleOrder(
            address maker,
            uint256 assetId,
            uint256 price,
            uint256 nonce,
            uint256 expiredAt,
            bytes signature
        ) external payable;
    }
}

/// Settles purchases through the marketplace gateway on the Ronin-style
/// chain.
pub struct RoninSubmitter {
    /// Local signer derived from the wallet private key.
    signer: PrivateKeySigner,
    /// HTTP RPC endpoint.
    rpc_url: url::Url,
    /// Gateway contract address.
    gateway: Address,
}

impl RoninSubmitter {
    /// Create a submitter from chain configuration and the wallet key.
    ///
    /// # Errors
    ///
    /// Returns an error if the private key is missing or invalid, or if
    /// the RPC URL or gateway address fail to parse.
    pub fn new(config: &ChainConfig, private_key: &str) -> Result<Self> {
        if private_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY",
            }
            .into());
        }

        let signer = PrivateKeySigner::from_str(private_key)
            .map_err(|e| ConfigError::InvalidValue {
                field: "WALLET_PRIVATE_KEY",
                reason: e.to_string(),
            })?
            .with_chain_id(Some(config.chain_id));

        let rpc_url: url::Url = config.rpc_url.parse()?;

        let gateway =
            Address::from_str(&config.gateway_address).map_err(|e| ConfigError::InvalidValue {
                field: "gateway_address",
                reason: e.to_string(),
            })?;

        info!(
            chain_id = config.chain_id,
            address = %signer.address(),
            gateway = %gateway,
            "Purchase submitter ready"
        );

        Ok(Self {
            signer,
            rpc_url,
            gateway,
        })
    }
}

#[async_trait]
impl PurchaseSubmitter for RoninSubmitter {
    async fn submit(&self, listing: &MarketListing) -> PurchaseResult {
        let maker = Address::from_str(&listing.maker)
            .map_err(|e| PurchaseError::Rejected(format!("malformed maker address: {e}")))?;
        let asset_id = U256::from_str(listing.asset_id.as_str())
            .map_err(|e| PurchaseError::Rejected(format!("malformed asset id: {e}")))?;
        let signature = Bytes::from_str(&listing.signature)
            .map_err(|e| PurchaseError::InvalidSignature(e.to_string()))?;

        let price = U256::from(listing.current_price.wei());
        let nonce = U256::from(listing.nonce);
        let expired_at = U256::from(listing.expires_at.timestamp().max(0) as u64);

        let wallet = alloy_provider::network::EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(self.rpc_url.clone());

        let gateway = IMarketGateway::new(self.gateway, &provider);

        let pending_tx = gateway
            .settleOrder(maker, asset_id, price, nonce, expired_at, signature)
            .value(price)
            .send()
            .await
            .map_err(|e| classify_submission_error(&e.to_string()))?;

        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| PurchaseError::Network(e.to_string()))?;

        if !receipt.status() {
            return Err(PurchaseError::Rejected(format!(
                "settlement reverted in tx {:?}",
                receipt.transaction_hash
            )));
        }

        Ok(PurchaseReceipt {
            tx_hash: format!("{:?}", receipt.transaction_hash),
            settled_price: listing.current_price,
        })
    }
}

/// Map an RPC submission error message onto the structured reasons.
///
/// The gateway's revert strings are the only signal available for
/// distinguishing "listing gone" from other rejections.
fn classify_submission_error(message: &str) -> PurchaseError {
    let lower = message.to_lowercase();

    if lower.contains("timed out") || lower.contains("timeout") {
        PurchaseError::Timeout(message.to_string())
    } else if lower.contains("expired")
        || lower.contains("filled")
        || lower.contains("cancel")
        || lower.contains("nonce")
        || lower.contains("order not found")
    {
        PurchaseError::ListingGone(message.to_string())
    } else if lower.contains("signature") {
        PurchaseError::InvalidSignature(message.to_string())
    } else if lower.contains("revert") || lower.contains("rejected") {
        PurchaseError::Rejected(message.to_string())
    } else {
        PurchaseError::Network(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_listing_gone_variants() {
        assert!(matches!(
            classify_submission_error("execution reverted: order already filled"),
            PurchaseError::ListingGone(_)
        ));
        assert!(matches!(
            classify_submission_error("execution reverted: invalid nonce"),
            PurchaseError::ListingGone(_)
        ));
        assert!(matches!(
            classify_submission_error("execution reverted: order expired"),
            PurchaseError::ListingGone(_)
        ));
    }

    #[test]
    fn classifies_signature_and_revert() {
        assert!(matches!(
            classify_submission_error("execution reverted: invalid signature"),
            PurchaseError::InvalidSignature(_)
        ));
        assert!(matches!(
            classify_submission_error("execution reverted: paused"),
            PurchaseError::Rejected(_)
        ));
    }

    #[test]
    fn classifies_transport_failures_as_network() {
        assert!(matches!(
            classify_submission_error("connection refused"),
            PurchaseError::Network(_)
        ));
        assert!(matches!(
            classify_submission_error("request timed out"),
            PurchaseError::Timeout(_)
        ));
    }
}
