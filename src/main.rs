// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use std::{env, sync::Arc};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use zorai_node::{
    api::{start_server, AppState},
    config::ZoraiConfig,
    service::ZoraiServices,
    version,
    wallet::{connect_shared, watch_wallet},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting ZorAi node...\n");
    println!("📦 BUILD VERSION: {}", version::VERSION);
    println!("📅 Build Date: {}", version::BUILD_DATE);
    println!();

    let config = ZoraiConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;
    let port = config.api_port;
    let poll_interval = config.wallet_poll_interval;

    let services = Arc::new(ZoraiServices::from_config(config)?);
    println!("✅ Services initialized");
    println!("   Chain: {} ({})", services.config.chain.name, services.config.chain.chain_id);
    match services.config.contract_address {
        Some(address) => println!("   Registry: {:?}", address),
        None => println!("   Registry: not configured"),
    }

    let shutdown = CancellationToken::new();

    if let Some(ref wallet) = services.wallet {
        match connect_shared(wallet).await {
            Ok(status) => info!(
                account = ?status.account,
                writes_enabled = status.writes_enabled,
                "Wallet connected"
            ),
            Err(e) => warn!("Wallet not connected at startup: {}", e),
        }
        tokio::spawn(watch_wallet(
            wallet.clone(),
            poll_interval,
            shutdown.child_token(),
        ));
    } else {
        println!("   Wallet: not configured, flagged images will not be registered");
    }

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n🛑 Shutting down...");
            signal_token.cancel();
        }
    });

    println!("🌐 API server on port {}", port);
    start_server(AppState::new(services, shutdown), port).await?;

    println!("👋 ZorAi node stopped");
    Ok(())
}
