// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation endpoint handler

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{debug, warn};

use super::request::GenerateImageRequest;
use super::response::GenerateImageResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /api/generate-image - Generate an image from a text prompt
///
/// Validation failures return 400 before any remote call. Classification,
/// pinning and registration problems never fail the request; they come back
/// as `registration` and `warnings` on the response.
pub async fn generate_image_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    debug!(prompt_len = request.prompt.len(), "Image generation request received");

    if let Err(e) = request.validate() {
        warn!("Image generation validation failed: {}", e);
        return Err(ApiError::ValidationError {
            field: "prompt".to_string(),
            message: e,
        });
    }

    let cancel = state.shutdown.child_token();
    let wallet = state.services.wallet.as_deref();
    let result = state
        .services
        .pipeline
        .run(&request.into(), wallet, &cancel)
        .await
        .map_err(|e| {
            warn!("Image generation failed: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(GenerateImageResponse::from(result)))
}
