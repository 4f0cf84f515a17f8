//! Purchase submission port.

use async_trait::async_trait;

use crate::domain::{MarketListing, PurchaseReceipt};
use crate::error::PurchaseError;

/// Result of a purchase submission.
pub type PurchaseResult = std::result::Result<PurchaseReceipt, PurchaseError>;

/// Submits settlement transactions against the marketplace contract.
///
/// Submission timeouts are owned by the underlying RPC layer; from the
/// coordinator's point of view every call eventually resolves to a
/// receipt or a structured [`PurchaseError`], and a failed submission is
/// terminal for the attempt - retry happens only via the next tick.
#[async_trait]
pub trait PurchaseSubmitter: Send + Sync {
    /// Settle a purchase against the captured listing snapshot.
    async fn submit(&self, listing: &MarketListing) -> PurchaseResult;
}
