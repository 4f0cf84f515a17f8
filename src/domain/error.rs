//! Domain validation errors for core domain types.
//!
//! These errors are returned by parsing constructors and by criteria
//! compilation when a stored value violates a domain rule.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A numeric filter bucket held a value that does not parse to an integer.
    ///
    /// Surfaced to the order's owner as a permanent order defect; the
    /// order is never silently dropped over this.
    #[error("filter dimension '{dimension}' holds non-numeric value '{value}'")]
    NonNumericBucket {
        /// The filter dimension the value belongs to.
        dimension: &'static str,
        /// The offending stored value.
        value: String,
    },

    /// A price string could not be parsed as a fixed-point coin amount.
    #[error("invalid price '{value}': {reason}")]
    InvalidPrice {
        /// The offending input.
        value: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A price exceeds the representable range in wei.
    #[error("price '{value}' overflows the wei range")]
    PriceOverflow {
        /// The offending input.
        value: String,
    },
}
