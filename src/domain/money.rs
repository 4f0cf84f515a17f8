//! Monetary types for marketplace prices.
//!
//! Prices are fixed-point amounts of the chain's native coin, held as an
//! integer number of wei. Decimal strings are parsed exactly through
//! [`rust_decimal`] and every comparison is an integer comparison, so no
//! floating-point rounding can ever flip a trigger decision.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::error::DomainError;

/// Number of wei per whole coin.
const COIN_DECIMALS: u32 = 18;

/// A native-coin amount in integer wei.
///
/// Ordering and equality are the integer ordering on wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u128);

impl Price {
    /// Zero wei.
    pub const ZERO: Price = Price(0);

    /// Create a price from a raw wei amount.
    #[must_use]
    pub const fn from_wei(wei: u128) -> Self {
        Self(wei)
    }

    /// The raw wei amount.
    #[must_use]
    pub const fn wei(&self) -> u128 {
        self.0
    }

    /// Parse a whole-coin decimal string (e.g. `"0.05"`) into wei.
    ///
    /// Parsing is exact: the input must be a non-negative fixed-point
    /// decimal with at most 18 fractional digits.
    pub fn from_coin_str(s: &str) -> Result<Self, DomainError> {
        let d = Decimal::from_str(s.trim()).map_err(|e| DomainError::InvalidPrice {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        if d.is_sign_negative() {
            return Err(DomainError::InvalidPrice {
                value: s.to_string(),
                reason: "price cannot be negative".to_string(),
            });
        }

        let scale = d.scale();
        if scale > COIN_DECIMALS {
            return Err(DomainError::InvalidPrice {
                value: s.to_string(),
                reason: format!("more than {COIN_DECIMALS} fractional digits"),
            });
        }

        let mantissa = d.mantissa().unsigned_abs();
        let factor = 10u128
            .checked_pow(COIN_DECIMALS - scale)
            .ok_or_else(|| DomainError::PriceOverflow {
                value: s.to_string(),
            })?;
        let wei = mantissa
            .checked_mul(factor)
            .ok_or_else(|| DomainError::PriceOverflow {
                value: s.to_string(),
            })?;

        Ok(Self(wei))
    }

    /// Parse a raw wei decimal string (the marketplace wire format).
    pub fn from_wei_str(s: &str) -> Result<Self, DomainError> {
        let wei = s.trim().parse::<u128>().map_err(|e| DomainError::InvalidPrice {
            value: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(wei))
    }

    /// Render as a normalized whole-coin decimal string.
    #[must_use]
    pub fn to_coin_string(&self) -> String {
        match i128::try_from(self.0) {
            Ok(v) => Decimal::from_i128_with_scale(v, COIN_DECIMALS)
                .normalize()
                .to_string(),
            // Out of Decimal range; show raw wei rather than lose digits.
            Err(_) => format!("{} wei", self.0),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coin_string())
    }
}

// Serialized as a wei string so store round-trips never touch decimals.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Price::from_wei_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coin_string_to_wei() {
        let p = Price::from_coin_str("0.05").unwrap();
        assert_eq!(p.wei(), 50_000_000_000_000_000);
    }

    #[test]
    fn parses_whole_coin_amounts() {
        let p = Price::from_coin_str("2").unwrap();
        assert_eq!(p.wei(), 2_000_000_000_000_000_000);
    }

    #[test]
    fn comparison_is_integer_exact() {
        let trigger = Price::from_coin_str("0.05").unwrap();
        let below = Price::from_coin_str("0.049999999999999999").unwrap();
        let above = Price::from_coin_str("0.050000000000000001").unwrap();

        assert!(trigger >= below);
        assert!(trigger < above);
    }

    #[test]
    fn rejects_negative_and_garbage() {
        assert!(Price::from_coin_str("-1").is_err());
        assert!(Price::from_coin_str("cheap").is_err());
        assert!(Price::from_wei_str("12.5").is_err());
    }

    #[test]
    fn rejects_sub_wei_precision() {
        let err = Price::from_coin_str("0.0000000000000000001").unwrap_err();
        assert!(matches!(err, DomainError::InvalidPrice { .. }));
    }

    #[test]
    fn displays_normalized_coin_amount() {
        let p = Price::from_wei(40_000_000_000_000_000);
        assert_eq!(p.to_string(), "0.04");
    }

    #[test]
    fn trailing_zeros_normalize_away() {
        use rust_decimal_macros::dec;

        let p = Price::from_coin_str("1.230").unwrap();
        assert_eq!(p.to_coin_string(), dec!(1.23).to_string());
    }

    #[test]
    fn wei_string_round_trips_through_serde() {
        let p = Price::from_coin_str("1.25").unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"1250000000000000000\"");
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
