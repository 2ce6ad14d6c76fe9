// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diffusion::{ImageGenError, ModelTier};
use crate::registration::RegistrationOutcome;
use crate::safety::RiskLevel;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub prompt: String,
    /// Caller-supplied identifier; a time-based one is assigned otherwise
    #[serde(default)]
    pub image_id: Option<String>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image_id: None,
        }
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.prompt.trim().is_empty() {
            return Err(PipelineError::Validation("Prompt is required".to_string()));
        }
        if let Some(ref id) = self.image_id {
            if id.trim().is_empty() {
                return Err(PipelineError::Validation(
                    "imageId must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Record of one generated image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub id: String,
    pub prompt: String,
    pub image_url: String,
    /// Set only when the image was pinned under a recognised CID
    pub ipfs_hash: Option<String>,
    pub timestamp: String,
    pub model_used: String,
    pub model_tier: ModelTier,
    pub is_risky: bool,
    pub risk_level: RiskLevel,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(flatten)]
    pub image: GeneratedImage,
    pub suggestions: Vec<String>,
    pub registration: RegistrationOutcome,
    pub warnings: Vec<String>,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{0}")]
    Validation(String),

    #[error("image generation failed: {0}")]
    ImageGeneration(#[from] ImageGenError),

    #[error("generation cancelled during {step}")]
    Cancelled { step: &'static str },
}

/// Millisecond timestamp id, matching the registry's image id format
pub fn new_image_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
