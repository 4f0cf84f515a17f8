//! Marketplace GraphQL client.
//!
//! Issues the paginated brief-list query the evaluator depends on. The
//! result-shape contract that matters downstream: results arrive in the
//! requested sort order, and `total` counts matches across all pages.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::debug;

use super::dto::{BriefListResponse, BriefListVariables, CriteriaInput, GraphQlRequest};
use crate::domain::{Criteria, ListingPage};
use crate::error::{Error, Result};
use crate::port::{AuctionKind, MarketQuery, SortOrder};

/// The brief-list query document.
const BRIEF_LIST_QUERY: &str = r"
query GetAssetBriefList($auctionType: AuctionType, $criteria: AssetSearchCriteria, $from: Int, $sort: SortBy, $size: Int) {
  assets(auctionType: $auctionType, criteria: $criteria, from: $from, sort: $sort, size: $size) {
    total
    results {
      id
      class
      auction {
        currentPrice
        order {
          maker
          expiredAt
          nonce
          signature
        }
      }
    }
  }
}";

/// HTTP client for the marketplace GraphQL API.
pub struct MarketplaceClient {
    http: HttpClient,
    graphql_url: String,
}

impl MarketplaceClient {
    /// Create a new client against the given GraphQL endpoint.
    #[must_use]
    pub fn new(graphql_url: String) -> Self {
        Self {
            http: HttpClient::new(),
            graphql_url,
        }
    }
}

#[async_trait]
impl MarketQuery for MarketplaceClient {
    async fn query(
        &self,
        criteria: &Criteria,
        from: u64,
        size: u64,
        sort: SortOrder,
        auction: AuctionKind,
    ) -> Result<ListingPage> {
        let request = GraphQlRequest {
            operation_name: "GetAssetBriefList",
            query: BRIEF_LIST_QUERY,
            variables: BriefListVariables {
                from,
                size,
                sort,
                auction_type: auction,
                criteria: CriteriaInput::from(criteria),
            },
        };

        let response: BriefListResponse = self
            .http
            .post(&self.graphql_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = response.errors.first() {
            return Err(Error::Query(err.message.clone()));
        }

        let page = response
            .data
            .ok_or_else(|| Error::Query("response carried neither data nor errors".into()))?
            .assets;

        let results: Vec<_> = page
            .results
            .into_iter()
            .filter_map(super::dto::AssetBrief::into_listing)
            .collect();

        debug!(
            total = page.total,
            returned = results.len(),
            "Marketplace page fetched"
        );

        Ok(ListingPage {
            total: page.total,
            results,
        })
    }
}
