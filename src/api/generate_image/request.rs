// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation request types and validation

use serde::{Deserialize, Serialize};

use crate::pipeline::GenerationRequest;

/// Request for image generation via POST /api/generate-image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    /// Text prompt describing the desired image
    #[serde(default)]
    pub prompt: String,

    /// Identifier to register the image under (optional; time-based otherwise)
    #[serde(default)]
    pub image_id: Option<String>,
}

impl GenerateImageRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("Prompt is required".to_string());
        }
        Ok(())
    }
}

impl From<GenerateImageRequest> for GenerationRequest {
    fn from(request: GenerateImageRequest) -> Self {
        GenerationRequest {
            prompt: request.prompt,
            image_id: request.image_id,
        }
    }
}
