// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Two-tier image synthesis with a single fallback on rejected requests

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::client::{ImageGenError, ImageGenerationRequest, ImageGenerator};

/// Model tier that produced an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    Primary,
    Fallback,
}

/// Request parameters for one model tier
#[derive(Debug, Clone)]
pub struct TierSettings {
    pub model: String,
    pub size: String,
    pub quality: Option<String>,
    pub style: Option<String>,
}

impl TierSettings {
    pub fn dall_e_3() -> Self {
        Self {
            model: "dall-e-3".to_string(),
            size: "1024x1024".to_string(),
            quality: Some("standard".to_string()),
            style: Some("vivid".to_string()),
        }
    }

    /// The lower tier does not accept quality or style
    pub fn dall_e_2() -> Self {
        Self {
            model: "dall-e-2".to_string(),
            size: "1024x1024".to_string(),
            quality: None,
            style: None,
        }
    }

    fn request_for(&self, prompt: &str) -> ImageGenerationRequest {
        ImageGenerationRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: self.size.clone(),
            quality: self.quality.clone(),
            style: self.style.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedImage {
    pub image_url: String,
    pub model_used: String,
    pub tier: ModelTier,
}

pub struct ImageSynthesizer {
    generator: Arc<dyn ImageGenerator>,
    primary: TierSettings,
    fallback: TierSettings,
    call_timeout: Duration,
}

impl ImageSynthesizer {
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        primary: TierSettings,
        fallback: TierSettings,
        call_timeout: Duration,
    ) -> Self {
        Self {
            generator,
            primary,
            fallback,
            call_timeout,
        }
    }

    pub fn primary_model(&self) -> &str {
        &self.primary.model
    }

    /// Generate an image, retrying once on the fallback tier when the primary
    /// tier rejects the request as invalid. Every other error surfaces as is.
    pub async fn synthesize(&self, prompt: &str) -> Result<SynthesizedImage, ImageGenError> {
        if prompt.trim().is_empty() {
            return Err(ImageGenError::Validation("prompt must not be empty".to_string()));
        }

        match self.generate_on(&self.primary, ModelTier::Primary, prompt).await {
            Err(e) if e.is_invalid_request() => {
                warn!(
                    primary = %self.primary.model,
                    fallback = %self.fallback.model,
                    "Primary tier rejected request ({}), falling back", e
                );
                self.generate_on(&self.fallback, ModelTier::Fallback, prompt)
                    .await
            }
            other => other,
        }
    }

    async fn generate_on(
        &self,
        tier_settings: &TierSettings,
        tier: ModelTier,
        prompt: &str,
    ) -> Result<SynthesizedImage, ImageGenError> {
        let request = tier_settings.request_for(prompt);
        let urls = tokio::time::timeout(self.call_timeout, self.generator.generate(&request))
            .await
            .map_err(|_| ImageGenError::Timeout)??;

        let image_url = urls.into_iter().next().ok_or(ImageGenError::EmptyResponse)?;
        info!(model = %tier_settings.model, ?tier, "Image generated");
        Ok(SynthesizedImage {
            image_url,
            model_used: tier_settings.model.clone(),
            tier,
        })
    }
}
