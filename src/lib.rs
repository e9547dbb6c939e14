// src/lib.rs

use std::sync::Arc;

// Re-export commonly used types
pub use ethers::types::{Address, H256, U256};

pub mod chain;
pub mod config;
pub mod mcp;
pub mod tools;
pub mod utils;
pub mod wormholescan;

/// Application state shared by every tool handler.
///
/// Both chain clients sign with the same identity; the dispatcher runs one
/// tool at a time against them, so nothing here needs interior mutability.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: config::Config,
    /// Client bound to the Sepolia RPC endpoint
    pub sepolia: Arc<dyn chain::ChainClient>,
    /// Client bound to the Monad testnet RPC endpoint
    pub monad: Arc<dyn chain::ChainClient>,
    /// Wormholescan client for bridge-history lookups
    pub bridge_scan: Arc<dyn wormholescan::BridgeScan>,
}
