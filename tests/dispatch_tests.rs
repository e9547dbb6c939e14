//! End-to-end dispatch tests against mocked chain clients.
//!
//! The mock records every chain call so the tests can assert not just on the
//! returned text but on which operations were (or were not) attempted.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use ethers::types::{Address, Bytes, H256, U256};
use ethers::utils::parse_ether;
use serde_json::json;

use monad_mcp_server::{
    chain::{ChainClient, ChainError},
    config::Config,
    tools::{build_registry, dispatch::Dispatcher},
    wormholescan::{BridgeOperation, BridgeScan, ChainLeg, LegTransaction, OperationFilter},
    AppState,
};

const SIGNER: &str = "0x00000000219ab540356cbb839cbe05303d7705fa";

#[derive(Default)]
struct MockChainClient {
    native_balance: U256,
    erc20_balance: U256,
    rpc_error: Option<String>,
    calls: Mutex<Vec<String>>,
    sent: Mutex<Vec<(Address, U256, Bytes, u64)>>,
}

impl MockChainClient {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    fn signer_address(&self) -> Address {
        SIGNER.parse().unwrap()
    }

    async fn native_balance(&self, _address: Address) -> Result<U256, ChainError> {
        self.record("native_balance");
        match &self.rpc_error {
            Some(message) => Err(ChainError::Rpc(message.clone())),
            None => Ok(self.native_balance),
        }
    }

    async fn erc20_balance_of(&self, _token: Address, _owner: Address) -> Result<U256, ChainError> {
        self.record("erc20_balance_of");
        Ok(self.erc20_balance)
    }

    async fn erc20_approve(
        &self,
        _token: Address,
        _spender: Address,
        _amount: U256,
    ) -> Result<H256, ChainError> {
        self.record("erc20_approve");
        Ok(H256::from_low_u64_be(1))
    }

    async fn bridge_transfer(
        &self,
        _bridge: Address,
        _token: Address,
        _amount: U256,
        _target_chain: u16,
        _delivery_gas_limit: U256,
        _recipient: [u8; 32],
        _fee: U256,
        _gas_limit: u64,
    ) -> Result<H256, ChainError> {
        self.record("bridge_transfer");
        Ok(H256::from_low_u64_be(2))
    }

    async fn send_transaction(
        &self,
        to: Address,
        value: U256,
        data: Bytes,
        gas_limit: u64,
    ) -> Result<H256, ChainError> {
        self.record("send_transaction");
        self.sent.lock().unwrap().push((to, value, data, gas_limit));
        Ok(H256::from_low_u64_be(3))
    }

    async fn wait_for_confirmation(&self, _tx_hash: H256) -> Result<(), ChainError> {
        self.record("wait_for_confirmation");
        Ok(())
    }
}

#[derive(Default)]
struct MockBridgeScan {
    operations: Vec<BridgeOperation>,
    filters: Mutex<Vec<(u16, u16)>>,
}

#[async_trait]
impl BridgeScan for MockBridgeScan {
    async fn fetch_operations(&self, filter: OperationFilter) -> Result<Vec<BridgeOperation>> {
        self.filters
            .lock()
            .unwrap()
            .push((filter.source_chain, filter.target_chain));
        Ok(self.operations.clone())
    }
}

fn dispatcher_with(
    sepolia: Arc<MockChainClient>,
    monad: Arc<MockChainClient>,
    scan: Arc<MockBridgeScan>,
) -> Dispatcher {
    let state = Arc::new(AppState {
        config: Config::default(),
        sepolia,
        monad,
        bridge_scan: scan,
    });
    Dispatcher::new(build_registry().unwrap(), state)
}

fn default_dispatcher() -> (Arc<MockChainClient>, Arc<MockChainClient>, Dispatcher) {
    let sepolia = Arc::new(MockChainClient::default());
    let monad = Arc::new(MockChainClient::default());
    let dispatcher = dispatcher_with(
        sepolia.clone(),
        monad.clone(),
        Arc::new(MockBridgeScan::default()),
    );
    (sepolia, monad, dispatcher)
}

#[tokio::test]
async fn unknown_tool_fails_in_band() {
    let (_, _, dispatcher) = default_dispatcher();
    let result = dispatcher.dispatch("unknown-tool", &json!({})).await;
    assert!(result.is_error);
    assert!(result.first_text().contains("Tool not found"));
}

#[tokio::test]
async fn capability_list_matches_the_registered_set() {
    let (_, _, dispatcher) = default_dispatcher();
    let listed: Vec<String> = dispatcher
        .list_tools()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    let registered: Vec<String> = dispatcher
        .registry()
        .names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(listed, registered);
    assert_eq!(listed.len(), 7);
}

#[tokio::test]
async fn wallet_address_tool_reports_the_signer() {
    let (_, _, dispatcher) = default_dispatcher();
    let result = dispatcher.dispatch("get-wallet-address", &json!({})).await;
    assert!(!result.is_error);
    assert!(result
        .first_text()
        .to_lowercase()
        .contains(&SIGNER[2..10]));
}

#[tokio::test]
async fn eth_balance_tool_formats_the_amount() {
    let sepolia = Arc::new(MockChainClient {
        native_balance: parse_ether("1.5").unwrap(),
        ..Default::default()
    });
    let dispatcher = dispatcher_with(
        sepolia,
        Arc::new(MockChainClient::default()),
        Arc::new(MockBridgeScan::default()),
    );
    let result = dispatcher.dispatch("get-eth-balance", &json!({})).await;
    assert!(!result.is_error);
    assert!(result.first_text().contains("1.5 ETH"));
}

#[tokio::test]
async fn chain_failures_are_caught_at_the_dispatch_boundary() {
    let monad = Arc::new(MockChainClient {
        rpc_error: Some("connection refused".into()),
        ..Default::default()
    });
    let dispatcher = dispatcher_with(
        Arc::new(MockChainClient::default()),
        monad,
        Arc::new(MockBridgeScan::default()),
    );
    let result = dispatcher.dispatch("get-mon-balance", &json!({})).await;
    assert!(result.is_error);
    assert!(result.first_text().contains("get-mon-balance"));
    assert!(result.first_text().contains("connection refused"));
}

#[tokio::test]
async fn over_limit_amount_fails_validation_before_any_chain_call() {
    let (sepolia, _, dispatcher) = default_dispatcher();
    let result = dispatcher
        .dispatch("bridge-sepolia-wmon-to-monad", &json!({"amount": "15"}))
        .await;
    assert!(result.is_error);
    assert_eq!(result.first_text(), "Maximum amount is 10");
    assert!(sepolia.calls().is_empty());
}

#[tokio::test]
async fn missing_amount_fails_validation_before_any_chain_call() {
    let (sepolia, _, dispatcher) = default_dispatcher();
    let result = dispatcher
        .dispatch("bridge-sepolia-wmon-to-monad", &json!({}))
        .await;
    assert!(result.is_error);
    assert!(result.first_text().contains("required"));
    assert!(sepolia.calls().is_empty());
}

#[tokio::test]
async fn insufficient_wmon_balance_stops_before_the_approval() {
    let sepolia = Arc::new(MockChainClient {
        erc20_balance: parse_ether("3").unwrap(),
        ..Default::default()
    });
    let dispatcher = dispatcher_with(
        sepolia.clone(),
        Arc::new(MockChainClient::default()),
        Arc::new(MockBridgeScan::default()),
    );
    let result = dispatcher
        .dispatch("bridge-sepolia-wmon-to-monad", &json!({"amount": "5"}))
        .await;
    assert!(result.is_error);
    assert!(result.first_text().contains("insufficient"));
    assert!(result.first_text().contains("3.0 wMON"));
    assert_eq!(sepolia.calls(), vec!["erc20_balance_of"]);
}

#[tokio::test]
async fn sepolia_bridge_runs_approve_then_transfer() {
    let sepolia = Arc::new(MockChainClient {
        erc20_balance: parse_ether("20").unwrap(),
        ..Default::default()
    });
    let dispatcher = dispatcher_with(
        sepolia.clone(),
        Arc::new(MockChainClient::default()),
        Arc::new(MockBridgeScan::default()),
    );
    let result = dispatcher
        .dispatch("bridge-sepolia-wmon-to-monad", &json!({"amount": "5"}))
        .await;
    assert!(!result.is_error, "unexpected failure: {}", result.first_text());
    assert!(result.first_text().contains("wormholescan.io"));
    assert_eq!(
        sepolia.calls(),
        vec![
            "erc20_balance_of",
            "erc20_approve",
            "wait_for_confirmation",
            "bridge_transfer",
            "wait_for_confirmation",
        ]
    );
}

#[tokio::test]
async fn monad_bridge_rejects_bad_amount_format() {
    let (_, monad, dispatcher) = default_dispatcher();
    let result = dispatcher
        .dispatch("bridge-monad-to-sepolia-wmon", &json!({"amount": "1.2.3"}))
        .await;
    assert!(result.is_error);
    assert!(monad.calls().is_empty());
}

#[tokio::test]
async fn monad_bridge_checks_balance_against_amount_plus_fee() {
    // 2 MON requested + ~0.4847 MON fee > 2.1 MON balance.
    let monad = Arc::new(MockChainClient {
        native_balance: parse_ether("2.1").unwrap(),
        ..Default::default()
    });
    let dispatcher = dispatcher_with(
        Arc::new(MockChainClient::default()),
        monad.clone(),
        Arc::new(MockBridgeScan::default()),
    );
    let result = dispatcher
        .dispatch("bridge-monad-to-sepolia-wmon", &json!({"amount": "2"}))
        .await;
    assert!(result.is_error);
    assert!(result.first_text().contains("not enough"));
    assert_eq!(monad.calls(), vec!["native_balance"]);
}

#[tokio::test]
async fn monad_bridge_sends_encoded_calldata_with_the_fee_on_top() {
    let monad = Arc::new(MockChainClient {
        native_balance: parse_ether("10").unwrap(),
        ..Default::default()
    });
    let dispatcher = dispatcher_with(
        Arc::new(MockChainClient::default()),
        monad.clone(),
        Arc::new(MockBridgeScan::default()),
    );
    let result = dispatcher
        .dispatch("bridge-monad-to-sepolia-wmon", &json!({"amount": "2"}))
        .await;
    assert!(!result.is_error, "unexpected failure: {}", result.first_text());

    let sent = monad.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let (to, value, data, gas_limit) = &sent[0];

    let config = Config::default();
    assert_eq!(*to, config.bridge_from_monad);
    assert_eq!(
        *value,
        parse_ether("2").unwrap() + config.monad_bridge_fee
    );
    assert_eq!(*gas_limit, config.bridge_tx_gas_limit);

    // selector + 4 slots
    assert_eq!(data.len(), 4 + 32 * 4);
    assert_eq!(&data[..4], [0xe5, 0xd4, 0x86, 0xa5]);
    let mut amount_slot = [0u8; 32];
    parse_ether("2").unwrap().to_big_endian(&mut amount_slot);
    assert_eq!(&data[4..36], amount_slot);
    // uint16 slot holds the Sepolia wormhole chain id (10002 = 0x2712)
    assert_eq!(data[66], 0x27);
    assert_eq!(data[67], 0x12);

    assert_eq!(
        monad.calls(),
        vec!["native_balance", "send_transaction", "wait_for_confirmation"]
    );
}

#[tokio::test]
async fn history_tool_queries_both_directions_and_renders_the_merge() {
    let operations = vec![BridgeOperation {
        source_chain: ChainLeg {
            chain_id: 48,
            transaction: Some(LegTransaction {
                tx_hash: "0xsource".into(),
            }),
            fee: Some("0.001".into()),
            timestamp: Some("2025-05-01T10:00:00Z".parse().unwrap()),
            status: Some("confirmed".into()),
        },
        target_chain: Some(ChainLeg {
            chain_id: 10_002,
            transaction: Some(LegTransaction {
                tx_hash: "0xtarget".into(),
            }),
            fee: Some("0.002".into()),
            timestamp: Some("2025-05-01T10:20:00Z".parse().unwrap()),
            status: Some("completed".into()),
        }),
    }];
    let scan = Arc::new(MockBridgeScan {
        operations,
        filters: Mutex::new(Vec::new()),
    });
    let dispatcher = dispatcher_with(
        Arc::new(MockChainClient::default()),
        Arc::new(MockChainClient::default()),
        scan.clone(),
    );

    let result = dispatcher
        .dispatch("get-10-last-bridge-transaction", &json!({}))
        .await;
    assert!(!result.is_error, "unexpected failure: {}", result.first_text());
    let text = result.first_text();
    assert!(text.contains("Last 10 Bridge Transactions"));
    assert!(text.contains("\"sourceChain\":\"Monad\""));
    assert!(text.contains("0.001 MON"));
    assert!(text.contains("0.002 ETH"));

    let filters = scan.filters.lock().unwrap().clone();
    assert_eq!(filters, vec![(48, 10_002), (10_002, 48)]);
}

#[tokio::test]
async fn dispatch_is_stable_across_repeated_lookups() {
    let (_, _, dispatcher) = default_dispatcher();
    let first = dispatcher.dispatch("get-wallet-address", &json!({})).await;
    let second = dispatcher.dispatch("get-wallet-address", &json!({})).await;
    assert_eq!(first, second);
}
