//! Wormholescan testnet API client.
//!
//! Bridge operations are tracked by Wormholescan, a third-party indexing
//! service. The [`BridgeScan`] trait is the seam the history tool talks
//! through; [`WormholeScanClient`] is the HTTP implementation and tests plug
//! in their own.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ethers::{types::Address, utils::to_checksum};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Query for one direction of bridge traffic involving one address.
#[derive(Debug, Clone, Copy)]
pub struct OperationFilter {
    pub address: Address,
    pub source_chain: u16,
    pub target_chain: u16,
    pub page_size: u32,
}

/// One indexed bridge operation: a source-chain leg and, once delivery
/// happened, a target-chain leg.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeOperation {
    pub source_chain: ChainLeg,
    #[serde(default)]
    pub target_chain: Option<ChainLeg>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainLeg {
    pub chain_id: u16,
    #[serde(default)]
    pub transaction: Option<LegTransaction>,
    #[serde(default)]
    pub fee: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegTransaction {
    pub tx_hash: String,
}

#[derive(Debug, Clone, Deserialize)]
struct OperationsPage {
    #[serde(default)]
    operations: Vec<BridgeOperation>,
}

#[async_trait]
pub trait BridgeScan: Send + Sync {
    /// Fetches the most recent operations matching `filter`, newest first.
    async fn fetch_operations(&self, filter: OperationFilter) -> Result<Vec<BridgeOperation>>;
}

/// HTTP client for the Wormholescan `/api/v1/operations` endpoint.
pub struct WormholeScanClient {
    http: Client,
    base_url: String,
}

impl WormholeScanClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl BridgeScan for WormholeScanClient {
    async fn fetch_operations(&self, filter: OperationFilter) -> Result<Vec<BridgeOperation>> {
        let url = format!(
            "{}/api/v1/operations",
            self.base_url.trim_end_matches('/')
        );
        debug!(
            source = filter.source_chain,
            target = filter.target_chain,
            "querying wormholescan"
        );
        let page: OperationsPage = self
            .http
            .get(&url)
            .query(&[
                ("page", "0".to_string()),
                ("pageSize", filter.page_size.to_string()),
                ("sortOrder", "DESC".to_string()),
                ("address", to_checksum(&filter.address, None)),
                ("appId", "GENERIC_RELAYER".to_string()),
                ("sourceChain", filter.source_chain.to_string()),
                ("targetChain", filter.target_chain.to_string()),
            ])
            .send()
            .await
            .context("wormholescan request failed")?
            .error_for_status()
            .context("wormholescan returned an error status")?
            .json()
            .await
            .context("invalid wormholescan response body")?;
        Ok(page.operations)
    }
}

/// Merges two direction queries, newest source-chain timestamp first, and
/// keeps at most `limit` operations. Legs without a timestamp sort last.
pub fn merge_recent(
    a: Vec<BridgeOperation>,
    b: Vec<BridgeOperation>,
    limit: usize,
) -> Vec<BridgeOperation> {
    let mut merged: Vec<BridgeOperation> = a.into_iter().chain(b).collect();
    merged.sort_by_key(|op| {
        std::cmp::Reverse(
            op.source_chain
                .timestamp
                .map(|t| t.timestamp_millis())
                .unwrap_or(0),
        )
    });
    merged.truncate(limit);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn op(chain_id: u16, ts: Option<&str>) -> BridgeOperation {
        BridgeOperation {
            source_chain: ChainLeg {
                chain_id,
                transaction: None,
                fee: None,
                timestamp: ts.map(|s| s.parse().unwrap()),
                status: None,
            },
            target_chain: None,
        }
    }

    #[test]
    fn merge_sorts_newest_first_and_truncates() {
        let a = vec![
            op(48, Some("2025-05-01T10:00:00Z")),
            op(48, Some("2025-05-03T10:00:00Z")),
        ];
        let b = vec![
            op(10_002, Some("2025-05-02T10:00:00Z")),
            op(10_002, None),
        ];
        let merged = merge_recent(a, b, 3);
        assert_eq!(merged.len(), 3);
        assert_eq!(
            merged[0].source_chain.timestamp,
            Some(chrono::Utc.with_ymd_and_hms(2025, 5, 3, 10, 0, 0).unwrap())
        );
        assert_eq!(merged[1].source_chain.chain_id, 10_002);
        assert_eq!(merged[2].source_chain.chain_id, 48);
    }

    #[tokio::test]
    async fn fetch_operations_parses_the_operations_page() {
        let body = r#"{
            "operations": [
                {
                    "sourceChain": {
                        "chainId": 48,
                        "transaction": { "txHash": "0xabc" },
                        "fee": "0.001",
                        "timestamp": "2025-05-01T10:00:00Z",
                        "status": "confirmed"
                    },
                    "targetChain": {
                        "chainId": 10002,
                        "transaction": { "txHash": "0xdef" },
                        "status": "completed"
                    }
                }
            ]
        }"#;
        let _m = mockito::mock(
            "GET",
            mockito::Matcher::Regex(r"^/api/v1/operations.*sourceChain=48&".into()),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create();

        let client = WormholeScanClient::new(mockito::server_url());
        let ops = client
            .fetch_operations(OperationFilter {
                address: Address::zero(),
                source_chain: 48,
                target_chain: 10_002,
                page_size: 10,
            })
            .await
            .unwrap();

        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].source_chain.chain_id, 48);
        assert_eq!(
            ops[0].source_chain.transaction.as_ref().unwrap().tx_hash,
            "0xabc"
        );
        let target = ops[0].target_chain.as_ref().unwrap();
        assert_eq!(target.chain_id, 10_002);
        assert_eq!(target.timestamp, None);
    }

    #[tokio::test]
    async fn fetch_operations_defaults_missing_operations_to_empty() {
        let _m = mockito::mock(
            "GET",
            mockito::Matcher::Regex(r"^/api/v1/operations.*sourceChain=10002&".into()),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create();

        let client = WormholeScanClient::new(mockito::server_url());
        let ops = client
            .fetch_operations(OperationFilter {
                address: Address::zero(),
                source_chain: 10_002,
                target_chain: 48,
                page_size: 10,
            })
            .await
            .unwrap();
        assert!(ops.is_empty());
    }
}
