// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzePromptRequest {
    #[serde(default)]
    pub prompt: String,
}

impl AnalyzePromptRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("Prompt is required".to_string());
        }
        Ok(())
    }
}
