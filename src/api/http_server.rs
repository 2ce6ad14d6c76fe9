// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::analyze::analyze_prompt_handler;
use super::chat_history::{append_chat_handler, list_chat_history_handler};
use super::generate_image::generate_image_handler;
use super::handlers::{health_handler, test_env_handler};
use super::pin::upload_to_pinata_handler;
use super::registry::{
    flagged_images_handler, high_risk_images_handler, image_data_handler, total_images_handler,
};
use super::wallet::{
    connect_wallet_handler, disconnect_wallet_handler, switch_network_handler,
    wallet_status_handler,
};
use crate::service::ZoraiServices;

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ZoraiServices>,
    /// Parent of every per-request cancellation token
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(services: Arc<ZoraiServices>, shutdown: CancellationToken) -> Self {
        Self { services, shutdown }
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/test-env", get(test_env_handler))
        .route("/api/analyze-prompt", post(analyze_prompt_handler))
        .route("/api/generate-image", post(generate_image_handler))
        .route("/api/upload-to-pinata", post(upload_to_pinata_handler))
        .route(
            "/api/chat-history",
            get(list_chat_history_handler).post(append_chat_handler),
        )
        .route("/api/wallet", get(wallet_status_handler))
        .route("/api/wallet/connect", post(connect_wallet_handler))
        .route("/api/wallet/disconnect", post(disconnect_wallet_handler))
        .route("/api/wallet/switch-network", post(switch_network_handler))
        .route("/api/images/total", get(total_images_handler))
        .route("/api/images/flagged", get(flagged_images_handler))
        .route("/api/images/high-risk", get(high_risk_images_handler))
        .route("/api/images/:id", get(image_data_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve until `state.shutdown` is cancelled
pub async fn start_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let shutdown = state.shutdown.clone();
    let app = create_app(Arc::new(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}
