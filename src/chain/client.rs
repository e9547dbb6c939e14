//! Chain access for the bridge tools.
//!
//! Each network is fronted by the narrow [`ChainClient`] trait so that tool
//! handlers never touch `ethers` middleware directly and tests can substitute
//! a mock client. The production implementation wraps a
//! `SignerMiddleware<Provider<Http>, LocalWallet>` holding the single signing
//! identity loaded at startup.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use ethers::{
    contract::abigen,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, PendingTransaction, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, Bytes, TransactionRequest, H256, U256},
};
use thiserror::Error;

abigen!(
    Erc20,
    r#"[
        function balanceOf(address owner) external view returns (uint256)
        function approve(address spender, uint256 amount) external returns (bool)
    ]"#
);

abigen!(
    SepoliaBridge,
    r#"[
        function transfer(address token, uint256 amount, uint16 targetChain, uint256 gasLimit, bytes32 recipient) external payable returns (uint64)
    ]"#
);

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("rpc error: {0}")]
    Rpc(String),
    #[error("contract call failed: {0}")]
    Contract(String),
    #[error("transaction {0:#x} was dropped before confirmation")]
    Dropped(H256),
}

/// Everything a tool handler may ask of one network.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address of the loaded signing key.
    fn signer_address(&self) -> Address;

    /// Native balance of `address` in wei.
    async fn native_balance(&self, address: Address) -> Result<U256, ChainError>;

    /// ERC-20 `balanceOf(owner)` on `token`.
    async fn erc20_balance_of(&self, token: Address, owner: Address) -> Result<U256, ChainError>;

    /// ERC-20 `approve(spender, amount)` on `token`; returns the tx hash.
    async fn erc20_approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<H256, ChainError>;

    /// Payable `transfer(token, amount, targetChain, gasLimit, recipient)` on
    /// the Sepolia bridge contract; `fee` rides along as the tx value.
    #[allow(clippy::too_many_arguments)]
    async fn bridge_transfer(
        &self,
        bridge: Address,
        token: Address,
        amount: U256,
        target_chain: u16,
        delivery_gas_limit: U256,
        recipient: [u8; 32],
        fee: U256,
        gas_limit: u64,
    ) -> Result<H256, ChainError>;

    /// Raw transaction with pre-assembled calldata.
    async fn send_transaction(
        &self,
        to: Address,
        value: U256,
        data: Bytes,
        gas_limit: u64,
    ) -> Result<H256, ChainError>;

    /// Blocks until `tx_hash` is mined.
    async fn wait_for_confirmation(&self, tx_hash: H256) -> Result<(), ChainError>;
}

/// `ethers`-backed [`ChainClient`] for one EVM network.
#[derive(Clone)]
pub struct EvmChainClient {
    inner: Arc<SignerMiddleware<Provider<Http>, LocalWallet>>,
}

impl EvmChainClient {
    /// Connects a provider to `rpc_url` and binds the signing key to it.
    pub fn connect(rpc_url: &str, private_key: &str, chain_id: u64) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .with_context(|| format!("invalid RPC URL: {rpc_url}"))?;
        let wallet = private_key
            .parse::<LocalWallet>()
            .map_err(|e| anyhow!("invalid private key: {e}"))?
            .with_chain_id(chain_id);
        Ok(Self {
            inner: Arc::new(SignerMiddleware::new(provider, wallet)),
        })
    }
}

#[async_trait]
impl ChainClient for EvmChainClient {
    fn signer_address(&self) -> Address {
        self.inner.signer().address()
    }

    async fn native_balance(&self, address: Address) -> Result<U256, ChainError> {
        self.inner
            .get_balance(address, None)
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))
    }

    async fn erc20_balance_of(&self, token: Address, owner: Address) -> Result<U256, ChainError> {
        let contract = Erc20::new(token, self.inner.clone());
        contract
            .balance_of(owner)
            .call()
            .await
            .map_err(|e| ChainError::Contract(e.to_string()))
    }

    async fn erc20_approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<H256, ChainError> {
        let contract = Erc20::new(token, self.inner.clone());
        let call = contract.approve(spender, amount);
        let pending = call
            .send()
            .await
            .map_err(|e| ChainError::Contract(e.to_string()))?;
        Ok(*pending)
    }

    async fn bridge_transfer(
        &self,
        bridge: Address,
        token: Address,
        amount: U256,
        target_chain: u16,
        delivery_gas_limit: U256,
        recipient: [u8; 32],
        fee: U256,
        gas_limit: u64,
    ) -> Result<H256, ChainError> {
        let contract = SepoliaBridge::new(bridge, self.inner.clone());
        let call = contract
            .transfer(token, amount, target_chain, delivery_gas_limit, recipient)
            .value(fee)
            .gas(gas_limit);
        let pending = call
            .send()
            .await
            .map_err(|e| ChainError::Contract(e.to_string()))?;
        Ok(*pending)
    }

    async fn send_transaction(
        &self,
        to: Address,
        value: U256,
        data: Bytes,
        gas_limit: u64,
    ) -> Result<H256, ChainError> {
        let tx = TransactionRequest::new()
            .to(to)
            .value(value)
            .data(data)
            .gas(gas_limit);
        let pending = self
            .inner
            .send_transaction(tx, None)
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;
        Ok(*pending)
    }

    async fn wait_for_confirmation(&self, tx_hash: H256) -> Result<(), ChainError> {
        let pending = PendingTransaction::new(tx_hash, self.inner.provider());
        let receipt = pending.await.map_err(|e| ChainError::Rpc(e.to_string()))?;
        match receipt {
            Some(_) => Ok(()),
            None => Err(ChainError::Dropped(tx_hash)),
        }
    }
}
