// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{debug, warn};

use super::request::AnalyzePromptRequest;
use super::response::AnalyzePromptResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /api/analyze-prompt - Classify a prompt without generating anything
pub async fn analyze_prompt_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzePromptRequest>,
) -> Result<Json<AnalyzePromptResponse>, ApiError> {
    if let Err(e) = request.validate() {
        return Err(ApiError::ValidationError {
            field: "prompt".to_string(),
            message: e,
        });
    }

    let verdict = state
        .services
        .pipeline
        .classifier()
        .classify(&request.prompt)
        .await
        .map_err(|e| {
            warn!("Error analyzing prompt: {}", e);
            ApiError::from(e)
        })?;

    debug!(risk_level = %verdict.risk_level, "Prompt analyzed");
    Ok(Json(AnalyzePromptResponse {
        success: true,
        data: verdict,
    }))
}
