//! Testnet constants for the Sepolia <-> Monad bridge.
//!
//! Addresses and fees mirror the deployed Wormhole relayer setup on both
//! testnets. Everything here can be overridden through the environment (see
//! `config.rs`); these are the defaults a fresh checkout runs against.

/// Wrapped MON (wMON) ERC-20 contract on Sepolia.
pub const WMON_SEPOLIA_CONTRACT: &str = "0xbc60de5fdec277c909eb1763f9996ca1ab496567";

/// Bridge (Wormhole relayer) contract called when bridging from Sepolia.
pub const BRIDGE_CONTRACT_FROM_SEPOLIA: &str = "0x7b1bd7a6b4e61c2a123ac6bc2cbfc614437d0470";

/// Bridge contract called when bridging from Monad testnet.
pub const BRIDGE_CONTRACT_FROM_MONAD: &str = "0x362fca37e45fe1096b42021b543f462d49a5c8df";

/// Wormhole chain id for Monad testnet.
pub const MONAD_WORMHOLE_CHAIN_ID: u16 = 48;

/// Wormhole chain id for Sepolia.
pub const SEPOLIA_WORMHOLE_CHAIN_ID: u16 = 10002;

/// EVM chain id for Sepolia.
pub const SEPOLIA_EVM_CHAIN_ID: u64 = 11155111;

/// EVM chain id for Monad testnet.
pub const MONAD_EVM_CHAIN_ID: u64 = 10143;

/// Function selector of the Monad-side bridge transfer entry point.
pub const MON_TRANSFER_SELECTOR: [u8; 4] = [0xe5, 0xd4, 0x86, 0xa5];

/// Gas limit requested for delivery on the target chain (Sepolia -> Monad).
pub const TARGET_DELIVERY_GAS_LIMIT: u64 = 375_000;

/// Delivery score slot sent in the Monad -> Sepolia calldata.
pub const MONAD_DELIVERY_SCORE: u64 = 6_000_000;

/// Gas limit for the bridge transactions themselves.
pub const BRIDGE_TX_GAS_LIMIT: u64 = 500_000;

/// Wormholescan testnet API base URL.
pub const WORMHOLESCAN_API_URL: &str = "https://api.testnet.wormholescan.io";
