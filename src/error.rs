use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Structured reasons a purchase submission can fail.
///
/// Every submission eventually resolves to a receipt or one of these;
/// the coordinator compensates on all of them.
#[derive(Error, Debug, Clone)]
pub enum PurchaseError {
    /// The chain accepted the transaction but settlement reverted.
    #[error("purchase rejected by chain: {0}")]
    Rejected(String),

    /// The listing was filled, cancelled, or expired before settlement.
    #[error("listing no longer valid: {0}")]
    ListingGone(String),

    /// The maker signature or nonce did not match the listing snapshot.
    #[error("listing signature invalid: {0}")]
    InvalidSignature(String),

    /// Transport-level failure talking to the RPC endpoint.
    #[error("network error during purchase: {0}")]
    Network(String),

    /// The submission did not resolve within the RPC layer's deadline.
    #[error("purchase submission timed out: {0}")]
    Timeout(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Purchase(#[from] PurchaseError),

    #[error("WebSocket error: {0}")]
    WebSocket(Box<tokio_tungstenite::tungstenite::Error>),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("marketplace query error: {0}")]
    Query(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Error::WebSocket(Box::new(err))
    }
}
