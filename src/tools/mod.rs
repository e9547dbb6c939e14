//! The tool surface of the server.
//!
//! Every operation the server exposes is a tool: a name, a description, a
//! declarative input schema, and an async handler. [`build_registry`] wires
//! up the full set; the dispatcher in [`dispatch`] runs them.

pub mod balance;
pub mod bridge;
pub mod dispatch;
pub mod history;
pub mod registry;
pub mod schema;
pub mod wallet;

use std::sync::Arc;

use serde::Serialize;

use registry::{RegistryError, ToolDefinition, ToolRegistry};
use schema::FieldSpec;

/// One block of tool output. The wire kind is always `text` today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Text,
            text: text.into(),
        }
    }
}

/// Outcome of one tool invocation.
///
/// Success and failure serialize to the same wire shape: an ordered list of
/// content blocks. The caller of the protocol sees "delivered" either way and
/// reads failure out of the text. The `is_error` tag is kept in memory for
/// tests and logging only; serde skips it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(skip)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
            is_error: false,
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
            is_error: true,
        }
    }

    /// Text of the first content block, for assertions and logs.
    pub fn first_text(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or("")
    }
}

/// Registers every tool this server exposes, in the order they are listed to
/// clients. The capability list is derived from this registry and nowhere
/// else.
pub fn build_registry() -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();

    registry.register(ToolDefinition::new(
        "get-wallet-address",
        "Get wallet address on Sepolia from the loaded private key (starts with 0x)",
        Vec::new(),
        Arc::new(|state, args| Box::pin(wallet::get_wallet_address(state, args))),
    ))?;

    registry.register(ToolDefinition::new(
        "get-eth-balance",
        "Get ETH balance for my address on Sepolia testnet",
        Vec::new(),
        Arc::new(|state, args| Box::pin(balance::get_eth_balance(state, args))),
    ))?;

    registry.register(ToolDefinition::new(
        "get-mon-balance",
        "Get MON balance for my address on Monad testnet",
        Vec::new(),
        Arc::new(|state, args| Box::pin(balance::get_mon_balance(state, args))),
    ))?;

    registry.register(ToolDefinition::new(
        "get-wmon-sepolia-balance",
        "Get Wrapped Monad (WMON) balance for my address on Sepolia testnet",
        Vec::new(),
        Arc::new(|state, args| Box::pin(balance::get_wmon_sepolia_balance(state, args))),
    ))?;

    registry.register(ToolDefinition::new(
        "bridge-sepolia-wmon-to-monad",
        "Bridge Token Wrapped Monad (WMON) on Sepolia to MON native on Monad chain",
        vec![(
            "amount".to_string(),
            FieldSpec::decimal("The amount of wMON to bridge from Sepolia to the Monad network")
                .required()
                .greater_than(0.0, "Amount must be greater than 0")
                .at_most(10.0, "Maximum amount is 10"),
        )],
        Arc::new(|state, args| Box::pin(bridge::bridge_sepolia_wmon_to_monad(state, args))),
    ))?;

    registry.register(ToolDefinition::new(
        "bridge-monad-to-sepolia-wmon",
        "Bridge MON from Monad to Sepolia wMON",
        vec![(
            "amount".to_string(),
            FieldSpec::decimal("The amount of MON to bridge from Monad to Sepolia wMON")
                .required()
                .decimal_format("Invalid amount format")
                .at_most(10.0, "Maximum amount is 10"),
        )],
        Arc::new(|state, args| Box::pin(bridge::bridge_monad_to_sepolia_wmon(state, args))),
    ))?;

    registry.register(ToolDefinition::new(
        "get-10-last-bridge-transaction",
        "Get and view the last 10 bridge transactions between Sepolia and Monad",
        Vec::new(),
        Arc::new(|state, args| Box::pin(history::get_last_bridge_transactions(state, args))),
    ))?;

    Ok(registry)
}
