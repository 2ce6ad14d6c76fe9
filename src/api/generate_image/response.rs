// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation response types

use serde::Serialize;

use crate::pipeline::GenerationResult;

/// Envelope for a finished generation. `data` carries the image record,
/// the registration outcome and any warnings.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateImageResponse {
    pub success: bool,
    pub data: GenerationResult,
}

impl From<GenerationResult> for GenerateImageResponse {
    fn from(data: GenerationResult) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
