//! The two bridge transfers.
//!
//! Business checks (insufficient balance) return failure text directly so the
//! wording stays tool-specific; chain faults bubble up to the dispatcher.

use std::sync::Arc;

use anyhow::{Context, Result};
use ethers::types::U256;
use ethers::utils::parse_ether;
use tracing::info;

use crate::chain::calldata::{address_to_bytes32, encode_call, AbiValue, TypeTag};
use crate::chain::constants::{
    MONAD_DELIVERY_SCORE, MONAD_WORMHOLE_CHAIN_ID, MON_TRANSFER_SELECTOR,
    SEPOLIA_WORMHOLE_CHAIN_ID,
};
use crate::tools::schema::ValidatedArgs;
use crate::tools::ToolResult;
use crate::utils::{
    display_address, format_native, monad_address_url, sepolia_address_url, wormholescan_tx_url,
};
use crate::AppState;

/// Bridges wMON (ERC-20 on Sepolia) to native MON on Monad.
///
/// Checks the wMON balance, approves the bridge contract for the amount,
/// waits for the approval, then submits the payable bridge transfer with the
/// fixed relay fee. There is no atomicity across the two transactions: if the
/// transfer fails after the approval confirms, the allowance stays granted
/// and a rerun reuses it.
pub async fn bridge_sepolia_wmon_to_monad(
    state: Arc<AppState>,
    args: ValidatedArgs,
) -> Result<ToolResult> {
    let amount_text = args
        .text("amount")
        .context("validated 'amount' argument missing")?;
    let amount = parse_ether(amount_text).context("failed to parse amount as wMON")?;

    let signer = state.sepolia.signer_address();
    let config = &state.config;

    let balance = state
        .sepolia
        .erc20_balance_of(config.wmon_sepolia, signer)
        .await?;
    if balance < amount {
        return Ok(ToolResult::failure(format!(
            "WMON balance is insufficient. The wMON balance on Sepolia is insufficient. \
             You need {amount_text} wMON to continue, but you only have {} wMON.",
            format_native(balance)
        )));
    }

    let approve_tx = state
        .sepolia
        .erc20_approve(config.wmon_sepolia, config.bridge_from_sepolia, amount)
        .await?;
    state.sepolia.wait_for_confirmation(approve_tx).await?;
    info!(tx = ?approve_tx, "bridge allowance approved");

    let transfer_tx = state
        .sepolia
        .bridge_transfer(
            config.bridge_from_sepolia,
            config.wmon_sepolia,
            amount,
            MONAD_WORMHOLE_CHAIN_ID,
            U256::from(config.target_delivery_gas_limit),
            address_to_bytes32(signer),
            config.sepolia_bridge_fee,
            config.bridge_tx_gas_limit,
        )
        .await?;
    state.sepolia.wait_for_confirmation(transfer_tx).await?;
    info!(tx = ?transfer_tx, "bridge transfer submitted");

    Ok(ToolResult::success(format!(
        "✅ **Bridge wrapped MON (wMON) to MONAD initiated successfully!**\n\
         🔁 Please allow approximately **18-20 minutes** for the bridge to complete and the \
         MON tokens to appear in your wallet on the Monad network.\n\
         🔗 View on Wormhole Scan:\n{}\n\
         🔗 Check your balance on Sepolia: {}\n\
         🔗 Check your MONAD balance: {}",
        wormholescan_tx_url(transfer_tx),
        sepolia_address_url(signer),
        monad_address_url(signer)
    )))
}

/// Bridges native MON on Monad to wMON on Sepolia.
///
/// The Monad bridge contract has no ABI binding, so the calldata is
/// hand-assembled: the transfer selector followed by
/// `(uint256 amountWei, uint16 sepoliaChainId, uint256 deliveryScore,
/// address signer)`. The fixed relay fee is added to the transaction value on
/// top of the bridged amount.
pub async fn bridge_monad_to_sepolia_wmon(
    state: Arc<AppState>,
    args: ValidatedArgs,
) -> Result<ToolResult> {
    let amount_text = args
        .text("amount")
        .context("validated 'amount' argument missing")?;
    let amount = parse_ether(amount_text).context("failed to parse amount as MON")?;

    let signer = state.monad.signer_address();
    let config = &state.config;
    let total_with_fee = amount + config.monad_bridge_fee;

    let balance = state.monad.native_balance(signer).await?;
    if balance < total_with_fee {
        return Ok(ToolResult::failure(format!(
            "❌ Failed! Your balance is not enough! The transaction needs {} MON \
             (amount + bridge fee), excluding gas, but you only have {} MON.",
            format_native(total_with_fee),
            format_native(balance)
        )));
    }

    let calldata = encode_call(
        MON_TRANSFER_SELECTOR,
        &[
            (TypeTag::Uint256, AbiValue::Uint(amount)),
            (
                TypeTag::Uint16,
                AbiValue::Uint(U256::from(SEPOLIA_WORMHOLE_CHAIN_ID)),
            ),
            (
                TypeTag::Uint256,
                AbiValue::Uint(U256::from(MONAD_DELIVERY_SCORE)),
            ),
            (TypeTag::Address, AbiValue::Address(signer)),
        ],
    )?;

    let tx = state
        .monad
        .send_transaction(
            config.bridge_from_monad,
            total_with_fee,
            calldata,
            config.bridge_tx_gas_limit,
        )
        .await?;
    state.monad.wait_for_confirmation(tx).await?;
    info!(tx = ?tx, "monad bridge transfer submitted");

    Ok(ToolResult::success(format!(
        "✅ **Bridge {} MON (amount + fee) initiated successfully!**\n\
         🔁 Please allow approximately **1-2 minutes** for the bridge to complete and the \
         wMON tokens to appear in your wallet on Sepolia.\n\
         🔗 View on Wormhole Scan:\n{}\n\
         🔗 Check your balance on Sepolia: {}\n\
         🔗 Check your MONAD balance: {}\n\
         Note: You will get wMON on Sepolia. Swap wMON/ETH on Uniswap Testnet to get ETH. \
         Import the wMON contract ({}) in Uniswap Testnet mode.",
        format_native(total_with_fee),
        wormholescan_tx_url(tx),
        sepolia_address_url(signer),
        monad_address_url(signer),
        display_address(config.wmon_sepolia)
    )))
}
