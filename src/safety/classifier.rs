// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt risk classifier backed by a text-completion service

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::verdict::RiskVerdict;
use crate::openai::{CompletionError, CompletionRequest, TextCompletion};

const SYSTEM_INSTRUCTION: &str = "You are an AI safety analyst. Analyze image prompts for potential risks and provide detailed feedback.";

#[derive(Error, Debug)]
pub enum ClassificationError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("classification unavailable: {0}")]
    Unavailable(String),

    #[error("classification timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            temperature: 0.3,
            max_tokens: 500,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Classifier that asks a completion service for a JSON risk verdict.
///
/// Malformed completions fail closed to [`RiskVerdict::fail_closed`] so a broken
/// classifier never blocks generation; only service failures surface as errors.
pub struct PromptRiskClassifier {
    completion: Arc<dyn TextCompletion>,
    settings: ClassifierSettings,
}

impl PromptRiskClassifier {
    pub fn new(completion: Arc<dyn TextCompletion>, settings: ClassifierSettings) -> Self {
        Self {
            completion,
            settings,
        }
    }

    /// Build the analysis message sent as the user turn
    pub fn build_analysis_prompt(&self, user_prompt: &str) -> String {
        format!(
            "Analyze this image generation prompt for potential risks:\n\
             - Could this image influence people's opinions or beliefs?\n\
             - Could it cause harm or negative consequences?\n\
             - Does it go against democratic principles?\n\
             - Could it be used for misinformation or manipulation?\n\n\
             Prompt: \"{}\"\n\n\
             Respond with a JSON object containing:\n\
             {{\n  \"isRisky\": boolean,\n  \"riskLevel\": \"low\" | \"medium\" | \"high\",\n  \"reasons\": string[],\n  \"suggestions\": string[]\n}}",
            user_prompt
        )
    }

    /// Parse a completion as a verdict. Anything that is not a JSON verdict yields the default.
    pub fn parse_verdict(&self, completion: &str) -> RiskVerdict {
        match serde_json::from_str::<RiskVerdict>(completion.trim()) {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!("Error parsing analysis response, using default verdict: {}", e);
                RiskVerdict::fail_closed()
            }
        }
    }

    pub async fn classify(&self, prompt: &str) -> Result<RiskVerdict, ClassificationError> {
        if prompt.trim().is_empty() {
            return Err(ClassificationError::EmptyPrompt);
        }

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            system: SYSTEM_INSTRUCTION.to_string(),
            user: self.build_analysis_prompt(prompt),
            temperature: Some(self.settings.temperature),
            max_tokens: self.settings.max_tokens,
        };

        let completion =
            match tokio::time::timeout(self.settings.timeout, self.completion.complete(&request))
                .await
            {
                Err(_) | Ok(Err(CompletionError::Timeout)) => {
                    return Err(ClassificationError::Timeout(self.settings.timeout))
                }
                Ok(Err(e)) => return Err(ClassificationError::Unavailable(e.to_string())),
                Ok(Ok(text)) => text,
            };

        let verdict = self.parse_verdict(&completion);
        debug!(
            risk_level = %verdict.risk_level,
            reasons = verdict.reasons.len(),
            "Prompt classified"
        );
        Ok(verdict)
    }
}
