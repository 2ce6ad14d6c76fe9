// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt log endpoints: GET/POST /api/chat-history

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use super::errors::ApiError;
use super::http_server::AppState;
use crate::openai::{CompletionError, CompletionRequest};
use crate::storage::ChatEntry;

const CHAT_SYSTEM_INSTRUCTION: &str = "You are a helpful assistant that provides information about AI-generated images and their verification.";
const CHAT_MAX_TOKENS: u32 = 1000;
const HISTORY_PAGE_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatEntryResponse {
    pub success: bool,
    pub data: ChatEntry,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryMetadata {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatHistoryResponse {
    pub success: bool,
    pub data: Vec<ChatEntry>,
    pub metadata: HistoryMetadata,
}

impl From<CompletionError> for ApiError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Timeout => ApiError::Timeout,
            CompletionError::NotConfigured => {
                ApiError::ServiceUnavailable("OpenAI API key not configured".to_string())
            }
            other => ApiError::UpstreamError(other.to_string()),
        }
    }
}

/// GET /api/chat-history
pub async fn list_chat_history_handler(
    State(state): State<Arc<AppState>>,
) -> Json<ChatHistoryResponse> {
    let entries = state.services.chat_history.read_all().await;
    Json(ChatHistoryResponse {
        success: true,
        metadata: HistoryMetadata {
            total: entries.len(),
            limit: HISTORY_PAGE_LIMIT,
            offset: 0,
        },
        data: entries,
    })
}

/// POST /api/chat-history - Ask the completion service and log the exchange
pub async fn append_chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatEntryResponse>, ApiError> {
    if request.prompt.trim().is_empty() {
        return Err(ApiError::ValidationError {
            field: "prompt".to_string(),
            message: "Prompt is required".to_string(),
        });
    }

    let completion = CompletionRequest {
        model: state.services.config.openai.chat_model.clone(),
        system: CHAT_SYSTEM_INSTRUCTION.to_string(),
        user: request.prompt.clone(),
        temperature: None,
        max_tokens: CHAT_MAX_TOKENS,
    };
    let response = state.services.completion.complete(&completion).await?;

    let entry = state
        .services
        .chat_history
        .append(ChatEntry::new(&request.prompt, &response))
        .await
        .map_err(|e| {
            error!("Failed to write chat history: {}", e);
            ApiError::InternalError(e.to_string())
        })?;
    info!(id = %entry.id, "Chat entry logged");

    Ok(Json(ChatEntryResponse {
        success: true,
        data: entry,
    }))
}
