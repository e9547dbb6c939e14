// src/main.rs

use std::sync::Arc;

use monad_mcp_server::{
    chain::{
        constants::{MONAD_EVM_CHAIN_ID, SEPOLIA_EVM_CHAIN_ID},
        EvmChainClient,
    },
    config::Config,
    mcp::server::McpServer,
    tools::{build_registry, dispatch::Dispatcher},
    wormholescan::WormholeScanClient,
    AppState,
};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // stdout carries the protocol, so all tracing output goes to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "monad_mcp_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("❌ Failed to load configuration: {e:#}");
            return;
        }
    };

    let sepolia = match EvmChainClient::connect(
        &config.sepolia_rpc_url,
        &config.private_key,
        SEPOLIA_EVM_CHAIN_ID,
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Failed to initialize Sepolia client: {e:#}");
            return;
        }
    };
    let monad = match EvmChainClient::connect(
        &config.monad_rpc_url,
        &config.private_key,
        MONAD_EVM_CHAIN_ID,
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Failed to initialize Monad client: {e:#}");
            return;
        }
    };
    let bridge_scan = WormholeScanClient::new(config.wormholescan_api_url.clone());

    let state = Arc::new(AppState {
        config,
        sepolia: Arc::new(sepolia),
        monad: Arc::new(monad),
        bridge_scan: Arc::new(bridge_scan),
    });

    let registry = match build_registry() {
        Ok(registry) => registry,
        Err(e) => {
            error!("❌ Failed to register tools: {e}");
            return;
        }
    };

    let server = McpServer::new(Dispatcher::new(registry, state));
    if let Err(e) = server.serve_stdio().await {
        error!("❌ MCP server error: {e:#}");
    }
}
