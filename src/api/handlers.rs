// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use super::http_server::AppState;
use crate::version;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub wallet_connected: bool,
    pub registry_configured: bool,
    pub pinning_configured: bool,
}

/// Public configuration only; never the credentials themselves
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEnvResponse {
    pub app_url: String,
    pub environment: String,
    pub image_size: String,
    pub image_model: String,
    pub has_open_ai_key: bool,
}

const NOT_SET: &str = "Not set";

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let wallet_connected = match state.services.wallet {
        Some(ref wallet) => wallet.read().await.is_connected(),
        None => false,
    };
    Json(HealthResponse {
        status: "ok".to_string(),
        version: version::VERSION_NUMBER.to_string(),
        wallet_connected,
        registry_configured: state.services.pipeline.gate().is_configured(),
        pinning_configured: state.services.pipeline.pinner().is_configured(),
    })
}

/// GET /api/test-env
pub async fn test_env_handler(State(state): State<Arc<AppState>>) -> Json<TestEnvResponse> {
    let config = &state.services.config;
    Json(TestEnvResponse {
        app_url: config.app_url.clone().unwrap_or_else(|| NOT_SET.to_string()),
        environment: config
            .environment
            .clone()
            .unwrap_or_else(|| NOT_SET.to_string()),
        image_size: config.openai.image_size.clone(),
        image_model: config.openai.image_primary_model.clone(),
        has_open_ai_key: config.has_openai_key(),
    })
}
