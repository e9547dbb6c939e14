//! Wallet address lookup.

use std::sync::Arc;

use anyhow::Result;

use crate::tools::schema::ValidatedArgs;
use crate::tools::ToolResult;
use crate::utils::display_address;
use crate::AppState;

/// Returns the 0x address derived from the loaded private key. Takes no
/// parameters; the key is assumed already loaded into the Sepolia client.
pub async fn get_wallet_address(state: Arc<AppState>, _args: ValidatedArgs) -> Result<ToolResult> {
    let address = state.sepolia.signer_address();
    Ok(ToolResult::success(format!(
        "🔐 Your wallet address: `{}`",
        display_address(address)
    )))
}
