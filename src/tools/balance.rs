//! Balance queries for the signer address.
//!
//! Three near-identical lookups: native ETH on Sepolia, native MON on Monad
//! testnet, and the wMON ERC-20 balance on Sepolia. Chain errors propagate to
//! the dispatcher, which turns them into error text.

use std::sync::Arc;

use anyhow::Result;

use crate::tools::schema::ValidatedArgs;
use crate::tools::ToolResult;
use crate::utils::{display_address, format_native};
use crate::AppState;

pub async fn get_eth_balance(state: Arc<AppState>, _args: ValidatedArgs) -> Result<ToolResult> {
    let address = state.sepolia.signer_address();
    let balance = state.sepolia.native_balance(address).await?;
    Ok(ToolResult::success(format!(
        "📍 **ETH Balance Check (Sepolia Testnet)**\n\n\
         **Address:** `{}`\n\
         **Balance:** {} ETH",
        display_address(address),
        format_native(balance)
    )))
}

pub async fn get_mon_balance(state: Arc<AppState>, _args: ValidatedArgs) -> Result<ToolResult> {
    let address = state.monad.signer_address();
    let balance = state.monad.native_balance(address).await?;
    Ok(ToolResult::success(format!(
        "📍 **MON Balance Check (Monad Testnet)**\n\n\
         **Address:** `{}`\n\
         **Balance:** {} MON",
        display_address(address),
        format_native(balance)
    )))
}

pub async fn get_wmon_sepolia_balance(
    state: Arc<AppState>,
    _args: ValidatedArgs,
) -> Result<ToolResult> {
    let address = state.sepolia.signer_address();
    let balance = state
        .sepolia
        .erc20_balance_of(state.config.wmon_sepolia, address)
        .await?;
    Ok(ToolResult::success(format!(
        "📍 **Wrapped Monad (WMON) Balance Check (Sepolia Testnet)**\n\n\
         **Address:** `{}`\n\
         **Balance:** {} WMON",
        display_address(address),
        format_native(balance)
    )))
}
