// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for wallet session endpoints

use axum::http::{Method, StatusCode};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::RwLock;

use super::support::{app, get, send};
use crate::common::*;
use zorai_node::config::ChainConfig;
use zorai_node::wallet::WalletConnection;

fn idle_wallet(wallet: Arc<MockWallet>) -> Arc<RwLock<WalletConnection>> {
    Arc::new(RwLock::new(WalletConnection::new(
        wallet,
        ChainConfig::bnb_testnet(),
    )))
}

#[tokio::test]
async fn test_wallet_endpoints_unavailable_without_bridge() {
    let dir = TempDir::new().unwrap();
    let parts = PipelineParts::new(MockCompletion::verdict("low", &[]));
    let services = services(&parts, None, None, dir.path().join("chat.json"));

    let (status, body) = get(app(services), "/api/wallet").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["message"], "Wallet bridge not configured");
}

#[tokio::test]
async fn test_connect_then_status() {
    let dir = TempDir::new().unwrap();
    let parts = PipelineParts::new(MockCompletion::verdict("low", &[]));
    let wallet = idle_wallet(MockWallet::on_bnb_testnet());
    let router = app(services(&parts, Some(wallet), None, dir.path().join("chat.json")));

    let (status, body) = send(router.clone(), Method::POST, "/api/wallet/connect", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isConnected"], true);
    assert_eq!(body["data"]["writesEnabled"], true);
    assert_eq!(body["data"]["chainId"], 97);

    let (_, body) = get(router, "/api/wallet").await;
    assert_eq!(body["data"]["isConnected"], true);
}

#[tokio::test]
async fn test_rejected_connect_is_forbidden() {
    let dir = TempDir::new().unwrap();
    let parts = PipelineParts::new(MockCompletion::verdict("low", &[]));
    let mock = MockWallet::on_bnb_testnet();
    mock.reject_connect();
    let router = app(services(
        &parts,
        Some(idle_wallet(mock)),
        None,
        dir.path().join("chat.json"),
    ));

    let (status, body) = send(router, Method::POST, "/api/wallet/connect", None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error_type"], "user_rejected");
    assert_eq!(body["message"], "Please connect your wallet to continue.");
}

#[tokio::test]
async fn test_switch_network_after_declined_guard() {
    let dir = TempDir::new().unwrap();
    let parts = PipelineParts::new(MockCompletion::verdict("low", &[]));
    let mock = MockWallet::new(vec![account(0xbb)], ETHEREUM_MAINNET);
    mock.set_switch(SwitchBehaviour::Reject);
    let router = app(services(
        &parts,
        Some(idle_wallet(mock.clone())),
        None,
        dir.path().join("chat.json"),
    ));

    let (_, body) = send(router.clone(), Method::POST, "/api/wallet/connect", None).await;
    assert_eq!(body["data"]["writesEnabled"], false);
    assert!(body["data"]["advisory"].is_string());

    let (status, _) = send(router.clone(), Method::POST, "/api/wallet/switch-network", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    mock.set_switch(SwitchBehaviour::Accept);
    let (status, body) = send(router, Method::POST, "/api/wallet/switch-network", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "switched");
    assert_eq!(body["data"]["writesEnabled"], true);
}

#[tokio::test]
async fn test_disconnect_clears_session() {
    let dir = TempDir::new().unwrap();
    let parts = PipelineParts::new(MockCompletion::verdict("low", &[]));
    let wallet = Arc::new(connected_wallet(MockWallet::on_bnb_testnet()).await);
    let router = app(services(&parts, Some(wallet), None, dir.path().join("chat.json")));

    let (status, body) = send(router, Method::POST, "/api/wallet/disconnect", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isConnected"], false);
    assert!(body["data"]["account"].is_null());
}
