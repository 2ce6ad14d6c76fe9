// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end generation flow
//!
//! Order of steps for one request:
//! 1. Validate the request
//! 2. Synthesize the image (primary tier, one fallback on a rejected request)
//! 3. Classify the prompt; a failed classification yields the default verdict
//! 4. Pin the image, only when the verdict is medium or high risk
//! 5. Hand the record to the registration gate
//!
//! Steps 3 to 5 never fail the request: their problems become warnings on the
//! result. The whole flow stops at the next step boundary once `cancel` fires.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::types::{
    new_image_id, now_timestamp, GeneratedImage, GenerationRequest, GenerationResult,
    PipelineError,
};
use crate::diffusion::ImageSynthesizer;
use crate::registration::RegistrationGate;
use crate::safety::{PromptRiskClassifier, RiskVerdict};
use crate::storage::ContentPinner;
use crate::wallet::WalletConnection;

async fn cancellable<F, T>(
    cancel: &CancellationToken,
    step: &'static str,
    fut: F,
) -> Result<T, PipelineError>
where
    F: Future<Output = T>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!(step, "Generation cancelled");
            Err(PipelineError::Cancelled { step })
        }
        out = fut => Ok(out),
    }
}

pub struct GenerationPipeline {
    synthesizer: Arc<ImageSynthesizer>,
    classifier: Arc<PromptRiskClassifier>,
    pinner: Arc<ContentPinner>,
    gate: Arc<RegistrationGate>,
}

impl GenerationPipeline {
    pub fn new(
        synthesizer: Arc<ImageSynthesizer>,
        classifier: Arc<PromptRiskClassifier>,
        pinner: Arc<ContentPinner>,
        gate: Arc<RegistrationGate>,
    ) -> Self {
        Self {
            synthesizer,
            classifier,
            pinner,
            gate,
        }
    }

    pub fn classifier(&self) -> &Arc<PromptRiskClassifier> {
        &self.classifier
    }

    pub fn pinner(&self) -> &Arc<ContentPinner> {
        &self.pinner
    }

    pub fn gate(&self) -> &Arc<RegistrationGate> {
        &self.gate
    }

    pub async fn run(
        &self,
        request: &GenerationRequest,
        wallet: Option<&RwLock<WalletConnection>>,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult, PipelineError> {
        request.validate()?;
        let image_id = request.image_id.clone().unwrap_or_else(new_image_id);
        info!(image_id = %image_id, "Starting image generation");

        let synthesized = cancellable(
            cancel,
            "synthesis",
            self.synthesizer.synthesize(&request.prompt),
        )
        .await??;

        let mut warnings = Vec::new();
        let verdict = match cancellable(
            cancel,
            "classification",
            self.classifier.classify(&request.prompt),
        )
        .await?
        {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(image_id = %image_id, "Prompt analysis failed: {}", e);
                warnings.push(format!("Prompt analysis unavailable: {}", e));
                RiskVerdict::fail_closed()
            }
        };

        let mut image = GeneratedImage {
            id: image_id,
            prompt: request.prompt.clone(),
            image_url: synthesized.image_url,
            ipfs_hash: None,
            timestamp: now_timestamp(),
            model_used: synthesized.model_used,
            model_tier: synthesized.tier,
            is_risky: verdict.is_risky,
            risk_level: verdict.risk_level,
            reasons: verdict.reasons.clone(),
        };

        if verdict.risk_level.requires_registration() {
            match cancellable(cancel, "pinning", self.pinner.pin_from_url(&image.image_url))
                .await?
            {
                Ok(pinned) => image.ipfs_hash = Some(pinned.cid),
                Err(e) => {
                    warn!(image_id = %image.id, "Pinning failed: {}", e);
                    warnings.push(format!("Image was not pinned to IPFS: {}", e));
                }
            }
        }

        let registration =
            cancellable(cancel, "registration", self.gate.register(&image, wallet)).await?;
        if let Some(warning) = registration.warning() {
            warnings.push(warning);
        }

        info!(
            image_id = %image.id,
            risk_level = %image.risk_level,
            pinned = image.ipfs_hash.is_some(),
            registered = registration.is_registered(),
            "Image generation finished"
        );
        Ok(GenerationResult {
            image,
            suggestions: verdict.suggestions,
            registration,
            warnings,
        })
    }
}
