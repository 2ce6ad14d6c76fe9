// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for two-tier image synthesis

use std::sync::Arc;
use std::time::Duration;

use crate::common::*;
use zorai_node::diffusion::{ImageGenError, ModelTier};

#[tokio::test]
async fn test_primary_tier_success_uses_dall_e_3() {
    let mut parts = PipelineParts::new(MockCompletion::verdict("low", &[]));
    parts.images = Arc::new(MockImageGenerator::new());
    let synthesizer = parts.synthesizer();

    let image = synthesizer.synthesize("a lighthouse at dusk").await.unwrap();

    assert_eq!(image.image_url, IMAGE_URL);
    assert_eq!(image.model_used, "dall-e-3");
    assert_eq!(image.tier, ModelTier::Primary);
    assert_eq!(parts.images.models_called(), vec!["dall-e-3"]);
}

#[tokio::test]
async fn test_primary_request_carries_quality_and_style() {
    let parts = PipelineParts::new(MockCompletion::verdict("low", &[]));
    parts.synthesizer().synthesize("a fox").await.unwrap();

    let calls = parts.images.calls.lock().unwrap();
    assert_eq!(calls[0].n, 1);
    assert_eq!(calls[0].size, "1024x1024");
    assert_eq!(calls[0].quality.as_deref(), Some("standard"));
    assert_eq!(calls[0].style.as_deref(), Some("vivid"));
}

#[tokio::test]
async fn test_invalid_request_falls_back_exactly_once() {
    let mut parts = PipelineParts::new(MockCompletion::verdict("low", &[]));
    parts.images = Arc::new(
        MockImageGenerator::new()
            .with("dall-e-3", Err(invalid_request("content policy violation")))
            .with("dall-e-2", Ok(vec![FALLBACK_IMAGE_URL.to_string()])),
    );

    let image = parts.synthesizer().synthesize("a protest banner").await.unwrap();

    assert_eq!(image.image_url, FALLBACK_IMAGE_URL);
    assert_eq!(image.model_used, "dall-e-2");
    assert_eq!(image.tier, ModelTier::Fallback);
    assert_eq!(parts.images.models_called(), vec!["dall-e-3", "dall-e-2"]);

    let calls = parts.images.calls.lock().unwrap();
    assert!(calls[1].quality.is_none());
    assert!(calls[1].style.is_none());
}

#[tokio::test]
async fn test_fallback_error_is_surfaced_without_retry() {
    let mut parts = PipelineParts::new(MockCompletion::verdict("low", &[]));
    parts.images = Arc::new(
        MockImageGenerator::new()
            .with("dall-e-3", Err(invalid_request("rejected")))
            .with("dall-e-2", Err(invalid_request("also rejected"))),
    );

    let err = parts.synthesizer().synthesize("anything").await.unwrap_err();

    assert_eq!(err, invalid_request("also rejected"));
    assert_eq!(parts.images.models_called().len(), 2);
}

#[tokio::test]
async fn test_other_primary_errors_do_not_fall_back() {
    let mut parts = PipelineParts::new(MockCompletion::verdict("low", &[]));
    parts.images = Arc::new(MockImageGenerator::new().with(
        "dall-e-3",
        Err(ImageGenError::RateLimited("slow down".to_string())),
    ));

    let err = parts.synthesizer().synthesize("anything").await.unwrap_err();

    assert!(matches!(err, ImageGenError::RateLimited(_)));
    assert_eq!(parts.images.models_called(), vec!["dall-e-3"]);
}

#[tokio::test]
async fn test_empty_response_is_an_error() {
    let mut parts = PipelineParts::new(MockCompletion::verdict("low", &[]));
    parts.images = Arc::new(MockImageGenerator::new().with("dall-e-3", Ok(vec![])));

    let err = parts.synthesizer().synthesize("anything").await.unwrap_err();
    assert_eq!(err, ImageGenError::EmptyResponse);
}

#[tokio::test]
async fn test_empty_prompt_is_rejected_before_any_call() {
    let parts = PipelineParts::new(MockCompletion::verdict("low", &[]));

    let err = parts.synthesizer().synthesize("   ").await.unwrap_err();

    assert!(matches!(err, ImageGenError::Validation(_)));
    assert!(parts.images.models_called().is_empty());
}

#[tokio::test]
async fn test_hanging_primary_times_out() {
    let mut parts = PipelineParts::new(MockCompletion::verdict("low", &[]));
    parts.images = Arc::new(MockImageGenerator::new().hanging_on("dall-e-3"));
    parts.call_timeout = Duration::from_millis(50);

    let err = parts.synthesizer().synthesize("anything").await.unwrap_err();
    assert_eq!(err, ImageGenError::Timeout);
}
