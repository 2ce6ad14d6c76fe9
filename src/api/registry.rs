// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Read-only registry queries over the public RPC

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use super::errors::ApiError;
use super::http_server::AppState;
use crate::contracts::{flagged_images, high_risk_images, RegisteredImage, RegistryReader};

#[derive(Debug, Clone, Serialize)]
pub struct RegistryResponse<T> {
    pub success: bool,
    pub data: T,
}

fn reader(state: &AppState) -> Result<&Arc<dyn RegistryReader>, ApiError> {
    state
        .services
        .registry_reader
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("Contract is not deployed".to_string()))
}

fn ok<T>(data: T) -> Json<RegistryResponse<T>> {
    Json(RegistryResponse {
        success: true,
        data,
    })
}

/// GET /api/images/total
pub async fn total_images_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RegistryResponse<u64>>, ApiError> {
    let total = reader(&state)?.total_images().await?;
    Ok(ok(total))
}

/// GET /api/images/flagged - medium and high risk entries
pub async fn flagged_images_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RegistryResponse<Vec<RegisteredImage>>>, ApiError> {
    let images = flagged_images(reader(&state)?.as_ref()).await.map_err(|e| {
        warn!("Error getting flagged images: {}", e);
        ApiError::from(e)
    })?;
    Ok(ok(images))
}

/// GET /api/images/high-risk
pub async fn high_risk_images_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RegistryResponse<Vec<RegisteredImage>>>, ApiError> {
    let images = high_risk_images(reader(&state)?.as_ref()).await.map_err(|e| {
        warn!("Error getting high-risk images: {}", e);
        ApiError::from(e)
    })?;
    Ok(ok(images))
}

/// GET /api/images/:id
pub async fn image_data_handler(
    State(state): State<Arc<AppState>>,
    Path(image_id): Path<String>,
) -> Result<Json<RegistryResponse<RegisteredImage>>, ApiError> {
    let image = reader(&state)?.image_data(&image_id).await?;
    Ok(ok(image))
}
