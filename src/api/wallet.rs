// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wallet session endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::errors::ApiError;
use super::http_server::AppState;
use crate::wallet::{
    connect_shared, switch_network_shared, GuardOutcome, WalletConnection, WalletStatus,
};

#[derive(Debug, Clone, Serialize)]
pub struct WalletResponse {
    pub success: bool,
    pub data: WalletStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchNetworkResponse {
    pub success: bool,
    pub outcome: GuardOutcome,
    pub data: WalletStatus,
}

fn wallet_handle(state: &AppState) -> Result<&Arc<RwLock<WalletConnection>>, ApiError> {
    state
        .services
        .wallet
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("Wallet bridge not configured".to_string()))
}

fn ok(data: WalletStatus) -> Json<WalletResponse> {
    Json(WalletResponse {
        success: true,
        data,
    })
}

/// GET /api/wallet
pub async fn wallet_status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WalletResponse>, ApiError> {
    let wallet = wallet_handle(&state)?;
    let status = wallet.read().await.status();
    Ok(ok(status))
}

/// POST /api/wallet/connect
pub async fn connect_wallet_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WalletResponse>, ApiError> {
    let wallet = wallet_handle(&state)?;
    let status = connect_shared(wallet).await?;
    Ok(ok(status))
}

/// POST /api/wallet/disconnect
pub async fn disconnect_wallet_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WalletResponse>, ApiError> {
    let wallet = wallet_handle(&state)?;
    let mut conn = wallet.write().await;
    conn.disconnect();
    Ok(ok(conn.status()))
}

/// POST /api/wallet/switch-network
pub async fn switch_network_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SwitchNetworkResponse>, ApiError> {
    let wallet = wallet_handle(&state)?;
    let (outcome, status) = switch_network_shared(wallet).await?;
    info!(?outcome, "Network switch finished");
    Ok(Json(SwitchNetworkResponse {
        success: true,
        outcome,
        data: status,
    }))
}
