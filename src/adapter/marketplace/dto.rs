//! Wire types for the marketplace GraphQL API.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{AssetId, Criteria, MarketListing, Price};
use crate::port::{AuctionKind, SortOrder};

/// Envelope for a GraphQL POST body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a> {
    pub operation_name: &'static str,
    pub query: &'static str,
    pub variables: BriefListVariables<'a>,
}

/// Variables for the brief-list query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefListVariables<'a> {
    pub from: u64,
    pub size: u64,
    pub sort: SortOrder,
    pub auction_type: AuctionKind,
    pub criteria: CriteriaInput<'a>,
}

/// Compiled criteria in the shape the marketplace expects.
///
/// Sets are serialized in their `BTreeSet` iteration order, which keeps
/// the part list (negations inline) deterministic for equal criteria.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaInput<'a> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breed_count: Vec<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pureness: Vec<u8>,
}

impl<'a> From<&'a Criteria> for CriteriaInput<'a> {
    fn from(criteria: &'a Criteria) -> Self {
        Self {
            classes: criteria.classes.iter().map(String::as_str).collect(),
            parts: criteria.parts.iter().map(String::as_str).collect(),
            breed_count: criteria.breed_count.iter().copied().collect(),
            pureness: criteria.pureness.iter().copied().collect(),
        }
    }
}

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct BriefListResponse {
    pub data: Option<BriefListData>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct BriefListData {
    pub assets: AssetPage,
}

#[derive(Debug, Deserialize)]
pub struct AssetPage {
    pub total: u64,
    pub results: Vec<AssetBrief>,
}

/// One asset row from the brief list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBrief {
    pub id: String,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub auction: Option<Auction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auction {
    /// Settlement price in wei, as a decimal string.
    pub current_price: String,
    #[serde(default)]
    pub order: Option<SaleOrder>,
}

/// The on-chain sale order backing an auction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleOrder {
    pub maker: String,
    /// Unix timestamp of order expiry.
    pub expired_at: i64,
    pub nonce: u64,
    pub signature: String,
}

impl AssetBrief {
    /// Map into a domain listing snapshot.
    ///
    /// Rows without a live auction order cannot be settled and are
    /// dropped; a malformed price is dropped with a warning rather than
    /// failing the whole page.
    pub fn into_listing(self) -> Option<MarketListing> {
        let auction = self.auction?;
        let order = auction.order?;

        let current_price = match Price::from_wei_str(&auction.current_price) {
            Ok(price) => price,
            Err(e) => {
                warn!(asset = %self.id, error = %e, "Dropping listing with malformed price");
                return None;
            }
        };

        let expires_at = match DateTime::from_timestamp(order.expired_at, 0) {
            Some(ts) => ts,
            None => {
                warn!(asset = %self.id, expired_at = order.expired_at, "Dropping listing with malformed expiry");
                return None;
            }
        };

        Some(MarketListing {
            asset_id: AssetId::new(self.id),
            class: self.class.unwrap_or_default(),
            current_price,
            maker: order.maker,
            expires_at,
            nonce: order.nonce,
            signature: order.signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FilterProperties;

    #[test]
    fn criteria_input_serializes_sets_in_stable_order() {
        let criteria = FilterProperties {
            classes: vec!["plant".into(), "beast".into()],
            parts: vec!["ears-nimo".into()],
            exclude_parts: vec!["mouth-goda".into()],
            breed_count: vec!["1".into(), "0".into()],
            ..FilterProperties::default()
        }
        .compile()
        .unwrap();

        let json = serde_json::to_value(CriteriaInput::from(&criteria)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "classes": ["beast", "plant"],
                "parts": ["!mouth-goda", "ears-nimo"],
                "breedCount": [0, 1],
            })
        );
    }

    #[test]
    fn asset_without_sale_order_is_dropped() {
        let brief = AssetBrief {
            id: "123".into(),
            class: Some("bird".into()),
            auction: Some(Auction {
                current_price: "1000".into(),
                order: None,
            }),
        };

        assert!(brief.into_listing().is_none());
    }

    #[test]
    fn asset_with_sale_order_maps_to_listing() {
        let brief = AssetBrief {
            id: "123".into(),
            class: Some("bird".into()),
            auction: Some(Auction {
                current_price: "40000000000000000".into(),
                order: Some(SaleOrder {
                    maker: "0xseller".into(),
                    expired_at: 1_900_000_000,
                    nonce: 7,
                    signature: "0xsig".into(),
                }),
            }),
        };

        let listing = brief.into_listing().unwrap();
        assert_eq!(listing.asset_id.as_str(), "123");
        assert_eq!(listing.current_price, Price::from_wei(40_000_000_000_000_000));
        assert_eq!(listing.nonce, 7);
    }
}
