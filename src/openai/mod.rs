// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OpenAI-compatible HTTP plumbing shared by the chat and image clients

pub mod chat;

pub use chat::{CompletionError, CompletionRequest, OpenAiChatClient, TextCompletion};

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Error envelope returned by OpenAI-compatible APIs
#[derive(Debug, Deserialize)]
pub struct OpenAiErrorBody {
    pub error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiErrorDetail {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl OpenAiErrorDetail {
    /// Parse an error body, falling back to the raw text when it is not the standard envelope
    pub fn from_body(text: &str) -> Self {
        serde_json::from_str::<OpenAiErrorBody>(text)
            .map(|body| body.error)
            .unwrap_or_else(|_| OpenAiErrorDetail {
                message: text.to_string(),
                error_type: None,
                code: None,
            })
    }
}

pub(crate) fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}
