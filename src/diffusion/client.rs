// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation client for the OpenAI images API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::openai::{build_client, OpenAiErrorDetail};

/// Allowed output sizes for image generation
pub const ALLOWED_SIZES: &[&str] = &["256x256", "512x512", "1024x1024", "1792x1024", "1024x1792"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageGenError {
    /// The service rejected the request itself (bad parameters, content policy)
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("authentication with image service failed: {0}")]
    Authentication(String),

    #[error("image service rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("image service returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("image service unreachable: {0}")]
    Transport(String),

    #[error("image generation timed out")]
    Timeout,

    #[error("no image data received from image service")]
    EmptyResponse,

    #[error("{0}")]
    Validation(String),
}

impl ImageGenError {
    /// Classify a non-success HTTP response from an OpenAI-compatible images endpoint
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = OpenAiErrorDetail::from_body(body);
        let invalid_type = detail.error_type.as_deref() == Some("invalid_request_error");
        match status {
            401 | 403 => ImageGenError::Authentication(detail.message),
            429 => ImageGenError::RateLimited(detail.message),
            400 => ImageGenError::InvalidRequest {
                message: detail.message,
            },
            _ if invalid_type => ImageGenError::InvalidRequest {
                message: detail.message,
            },
            _ => ImageGenError::Upstream {
                status,
                message: detail.message,
            },
        }
    }

    pub fn is_invalid_request(&self) -> bool {
        matches!(self, ImageGenError::InvalidRequest { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl ImageGenerationRequest {
    /// Validate the request fields
    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("prompt must not be empty".to_string());
        }
        if !ALLOWED_SIZES.contains(&self.size.as_str()) {
            return Err(format!(
                "invalid size '{}'; allowed: {}",
                self.size,
                ALLOWED_SIZES.join(", ")
            ));
        }
        if self.n == 0 {
            return Err("n must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Boundary to an image-generation service; returns image URLs
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &ImageGenerationRequest)
        -> Result<Vec<String>, ImageGenError>;
}

// --- OpenAI-compatible response types ---

#[derive(Debug, Deserialize)]
pub struct OpenAIImageResponse {
    pub data: Vec<OpenAIImageData>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIImageData {
    pub url: Option<String>,
    pub revised_prompt: Option<String>,
}

/// Client for the OpenAI `/images/generations` endpoint
pub struct OpenAiImageClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiImageClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = build_client(timeout)?;
        let base_url = base_url.trim_end_matches('/').to_string();
        info!("Image client configured: base_url={}", base_url);
        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    async fn generate(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<Vec<String>, ImageGenError> {
        request.validate().map_err(ImageGenError::Validation)?;

        let url = format!("{}/images/generations", self.base_url);
        debug!(model = %request.model, "Image generate POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ImageGenError::Timeout
                } else {
                    ImageGenError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ImageGenError::from_response(status.as_u16(), &text));
        }

        let api_response: OpenAIImageResponse =
            response.json().await.map_err(|e| ImageGenError::Upstream {
                status: status.as_u16(),
                message: format!("JSON parse error: {}", e),
            })?;

        let urls: Vec<String> = api_response
            .data
            .into_iter()
            .filter_map(|d| d.url)
            .collect();
        if urls.is_empty() {
            return Err(ImageGenError::EmptyResponse);
        }
        Ok(urls)
    }
}
