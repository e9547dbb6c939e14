pub mod calldata;
pub mod client;
pub mod constants;

pub use client::{ChainClient, ChainError, EvmChainClient};
