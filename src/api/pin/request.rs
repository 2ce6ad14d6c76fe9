// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRequest {
    #[serde(default)]
    pub image_url: String,
}

impl PinRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.image_url.trim().is_empty() {
            return Err("Missing imageUrl".to_string());
        }
        Ok(())
    }
}
