// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::warn;

use super::request::PinRequest;
use super::response::PinResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /api/upload-to-pinata - Fetch an image URL and pin it to IPFS
pub async fn upload_to_pinata_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PinRequest>,
) -> Result<Json<PinResponse>, ApiError> {
    if let Err(e) = request.validate() {
        return Err(ApiError::ValidationError {
            field: "imageUrl".to_string(),
            message: e,
        });
    }

    let pinned = state
        .services
        .pipeline
        .pinner()
        .pin_from_url(&request.image_url)
        .await
        .map_err(|e| {
            warn!("Error uploading to Pinata: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(PinResponse::from(pinned)))
}
