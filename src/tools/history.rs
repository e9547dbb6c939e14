//! Bridge-history lookup via Wormholescan.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::tools::schema::ValidatedArgs;
use crate::tools::ToolResult;
use crate::utils::display_address;
use crate::wormholescan::{merge_recent, BridgeOperation, ChainLeg, OperationFilter};
use crate::AppState;
use crate::chain::constants::{MONAD_WORMHOLE_CHAIN_ID, SEPOLIA_WORMHOLE_CHAIN_ID};

const HISTORY_LIMIT: usize = 10;

/// Flattened view of one bridge operation, rendered as JSON in the tool text.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BridgeTransferSummary {
    source_chain: &'static str,
    source_hash: String,
    source_gas_fee: String,
    source_timestamp: Option<DateTime<Utc>>,
    source_status: String,
    target_chain: &'static str,
    target_hash: String,
    target_gas_fee: String,
    target_timestamp: Option<DateTime<Utc>>,
    target_status: String,
}

fn chain_name(chain_id: u16) -> &'static str {
    if chain_id == MONAD_WORMHOLE_CHAIN_ID {
        "Monad"
    } else {
        "Sepolia"
    }
}

fn fee_with_unit(leg: &ChainLeg) -> String {
    let unit = if leg.chain_id == MONAD_WORMHOLE_CHAIN_ID {
        "MON"
    } else {
        "ETH"
    };
    match &leg.fee {
        Some(fee) => format!("{fee} {unit}"),
        None => String::new(),
    }
}

fn summarize(op: &BridgeOperation) -> BridgeTransferSummary {
    let source = &op.source_chain;
    let target = op.target_chain.as_ref();
    BridgeTransferSummary {
        source_chain: chain_name(source.chain_id),
        source_hash: source
            .transaction
            .as_ref()
            .map(|t| t.tx_hash.clone())
            .unwrap_or_default(),
        source_gas_fee: fee_with_unit(source),
        source_timestamp: source.timestamp,
        source_status: source.status.clone().unwrap_or_default(),
        target_chain: target.map(|t| chain_name(t.chain_id)).unwrap_or("Sepolia"),
        target_hash: target
            .and_then(|t| t.transaction.as_ref())
            .map(|t| t.tx_hash.clone())
            .unwrap_or_default(),
        target_gas_fee: target.map(fee_with_unit).unwrap_or_default(),
        target_timestamp: target.and_then(|t| t.timestamp),
        target_status: target
            .and_then(|t| t.status.clone())
            .unwrap_or_default(),
    }
}

/// Returns the 10 most recent bridge operations involving the signer, both
/// directions merged and ordered newest first.
pub async fn get_last_bridge_transactions(
    state: Arc<AppState>,
    _args: ValidatedArgs,
) -> Result<ToolResult> {
    let address = state.monad.signer_address();

    let monad_to_sepolia = state
        .bridge_scan
        .fetch_operations(OperationFilter {
            address,
            source_chain: MONAD_WORMHOLE_CHAIN_ID,
            target_chain: SEPOLIA_WORMHOLE_CHAIN_ID,
            page_size: HISTORY_LIMIT as u32,
        })
        .await?;
    let sepolia_to_monad = state
        .bridge_scan
        .fetch_operations(OperationFilter {
            address,
            source_chain: SEPOLIA_WORMHOLE_CHAIN_ID,
            target_chain: MONAD_WORMHOLE_CHAIN_ID,
            page_size: HISTORY_LIMIT as u32,
        })
        .await?;

    let recent = merge_recent(monad_to_sepolia, sepolia_to_monad, HISTORY_LIMIT);
    let summaries: Vec<BridgeTransferSummary> = recent.iter().map(summarize).collect();
    let rendered =
        serde_json::to_string(&summaries).context("failed to render bridge history")?;

    Ok(ToolResult::success(format!(
        "📨 **Last 10 Bridge Transactions** for address `{}`\n\n{rendered}",
        display_address(address)
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wormholescan::LegTransaction;

    #[test]
    fn summary_names_chains_and_fee_units() {
        let op = BridgeOperation {
            source_chain: ChainLeg {
                chain_id: 48,
                transaction: Some(LegTransaction {
                    tx_hash: "0xabc".into(),
                }),
                fee: Some("0.001".into()),
                timestamp: None,
                status: Some("confirmed".into()),
            },
            target_chain: Some(ChainLeg {
                chain_id: 10_002,
                transaction: None,
                fee: Some("0.002".into()),
                timestamp: None,
                status: None,
            }),
        };
        let summary = summarize(&op);
        assert_eq!(summary.source_chain, "Monad");
        assert_eq!(summary.source_gas_fee, "0.001 MON");
        assert_eq!(summary.target_chain, "Sepolia");
        assert_eq!(summary.target_gas_fee, "0.002 ETH");
        assert_eq!(summary.target_hash, "");
    }

    #[test]
    fn pending_operations_without_a_target_leg_still_render() {
        let op = BridgeOperation {
            source_chain: ChainLeg {
                chain_id: 10_002,
                transaction: None,
                fee: None,
                timestamp: None,
                status: Some("in_progress".into()),
            },
            target_chain: None,
        };
        let summary = summarize(&op);
        assert_eq!(summary.source_chain, "Sepolia");
        assert_eq!(summary.source_gas_fee, "");
        assert_eq!(summary.target_status, "");
    }
}
