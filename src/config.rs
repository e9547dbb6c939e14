// src/config.rs

use std::env;

use anyhow::{Context, Result};
use ethers::types::{Address, U256};

use crate::chain::constants;

/// Relay fee in wei attached to a Sepolia -> Monad transfer (0.003625 ETH).
const SEPOLIA_BRIDGE_FEE_WEI: u128 = 3_625_000_000_000_000;

/// Relay fee in wei added to a Monad -> Sepolia transfer (0.4847456273 MON).
const MONAD_BRIDGE_FEE_WEI: u128 = 484_745_627_300_000_000;

/// All configuration, loaded once at startup from the environment (a `.env`
/// file is honored). Only `PRIVATE_KEY` is mandatory; everything else
/// defaults to the deployed testnet setup in `chain::constants`.
#[derive(Clone, Debug)]
pub struct Config {
    /// Hex private key of the single signing identity. Both networks sign
    /// with the same key.
    pub private_key: String,

    // RPC endpoints
    pub sepolia_rpc_url: String,
    pub monad_rpc_url: String,

    // Bridge wiring
    pub wmon_sepolia: Address,
    pub bridge_from_sepolia: Address,
    pub bridge_from_monad: Address,
    pub sepolia_bridge_fee: U256,
    pub monad_bridge_fee: U256,
    pub target_delivery_gas_limit: u64,
    pub bridge_tx_gas_limit: u64,

    // External services
    pub wormholescan_api_url: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let private_key =
            env::var("PRIVATE_KEY").context("PRIVATE_KEY must be set to a hex private key")?;

        let wmon_sepolia = env::var("WMON_SEPOLIA_CONTRACT")
            .unwrap_or_else(|_| constants::WMON_SEPOLIA_CONTRACT.to_string())
            .parse::<Address>()
            .context("WMON_SEPOLIA_CONTRACT must be a valid address")?;
        let bridge_from_sepolia = env::var("BRIDGE_CONTRACT_FROM_SEPOLIA")
            .unwrap_or_else(|_| constants::BRIDGE_CONTRACT_FROM_SEPOLIA.to_string())
            .parse::<Address>()
            .context("BRIDGE_CONTRACT_FROM_SEPOLIA must be a valid address")?;
        let bridge_from_monad = env::var("BRIDGE_CONTRACT_FROM_MONAD")
            .unwrap_or_else(|_| constants::BRIDGE_CONTRACT_FROM_MONAD.to_string())
            .parse::<Address>()
            .context("BRIDGE_CONTRACT_FROM_MONAD must be a valid address")?;

        let bridge_tx_gas_limit = env::var("BRIDGE_TX_GAS_LIMIT")
            .unwrap_or_else(|_| constants::BRIDGE_TX_GAS_LIMIT.to_string())
            .parse::<u64>()
            .context("BRIDGE_TX_GAS_LIMIT must be a valid number")?;

        Ok(Config {
            private_key,
            sepolia_rpc_url: env::var("SEPOLIA_RPC_URL")
                .unwrap_or_else(|_| "https://ethereum-sepolia-rpc.publicnode.com".to_string()),
            monad_rpc_url: env::var("MONAD_RPC_URL")
                .unwrap_or_else(|_| "https://testnet-rpc.monad.xyz".to_string()),
            wmon_sepolia,
            bridge_from_sepolia,
            bridge_from_monad,
            sepolia_bridge_fee: U256::from(SEPOLIA_BRIDGE_FEE_WEI),
            monad_bridge_fee: U256::from(MONAD_BRIDGE_FEE_WEI),
            target_delivery_gas_limit: constants::TARGET_DELIVERY_GAS_LIMIT,
            bridge_tx_gas_limit,
            wormholescan_api_url: env::var("WORMHOLESCAN_API_URL")
                .unwrap_or_else(|_| constants::WORMHOLESCAN_API_URL.to_string()),
        })
    }
}

impl Default for Config {
    /// Testnet defaults with no key loaded. Used by tests that never touch a
    /// real network.
    fn default() -> Self {
        Config {
            private_key: String::new(),
            sepolia_rpc_url: "https://ethereum-sepolia-rpc.publicnode.com".to_string(),
            monad_rpc_url: "https://testnet-rpc.monad.xyz".to_string(),
            wmon_sepolia: constants::WMON_SEPOLIA_CONTRACT
                .parse()
                .expect("static wMON address"),
            bridge_from_sepolia: constants::BRIDGE_CONTRACT_FROM_SEPOLIA
                .parse()
                .expect("static bridge address"),
            bridge_from_monad: constants::BRIDGE_CONTRACT_FROM_MONAD
                .parse()
                .expect("static bridge address"),
            sepolia_bridge_fee: U256::from(SEPOLIA_BRIDGE_FEE_WEI),
            monad_bridge_fee: U256::from(MONAD_BRIDGE_FEE_WEI),
            target_delivery_gas_limit: constants::TARGET_DELIVERY_GAS_LIMIT,
            bridge_tx_gas_limit: constants::BRIDGE_TX_GAS_LIMIT,
            wormholescan_api_url: constants::WORMHOLESCAN_API_URL.to_string(),
        }
    }
}
