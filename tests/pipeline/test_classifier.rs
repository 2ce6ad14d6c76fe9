// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for prompt risk classification

use std::time::Duration;

use crate::common::*;
use zorai_node::safety::{ClassificationError, RiskLevel, RiskVerdict};

#[tokio::test]
async fn test_well_formed_verdict_is_returned() {
    let parts = PipelineParts::new(MockCompletion::verdict(
        "high",
        &["political persuasion", "impersonation"],
    ));

    let verdict = parts.classifier().classify("a fake campaign poster").await.unwrap();

    assert!(verdict.is_risky);
    assert_eq!(verdict.risk_level, RiskLevel::High);
    assert_eq!(verdict.reasons.len(), 2);
    assert_eq!(verdict.suggestions.len(), 1);
}

#[tokio::test]
async fn test_request_uses_gpt4_with_low_temperature() {
    let parts = PipelineParts::new(MockCompletion::verdict("low", &[]));
    parts.classifier().classify("a cat").await.unwrap();

    let calls = parts.completion.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].model, "gpt-4");
    assert_eq!(calls[0].temperature, Some(0.3));
    assert_eq!(calls[0].max_tokens, 500);
    assert!(calls[0].user.contains("Prompt: \"a cat\""));
}

#[tokio::test]
async fn test_prose_reply_fails_closed_to_default_verdict() {
    let parts = PipelineParts::new(MockCompletion::replying(
        "I think this prompt is fine, nothing to worry about.",
    ));

    let verdict = parts.classifier().classify("a cat").await.unwrap();

    assert_eq!(verdict, RiskVerdict::fail_closed());
    assert!(!verdict.is_risky);
    assert_eq!(verdict.risk_level, RiskLevel::Low);
    assert!(verdict.reasons.is_empty());
}

#[tokio::test]
async fn test_unknown_risk_level_fails_closed() {
    let parts = PipelineParts::new(MockCompletion::replying(
        r#"{"isRisky": true, "riskLevel": "extreme", "reasons": [], "suggestions": []}"#,
    ));

    let verdict = parts.classifier().classify("a cat").await.unwrap();
    assert_eq!(verdict, RiskVerdict::fail_closed());
}

#[tokio::test]
async fn test_service_failure_is_an_error() {
    let parts = PipelineParts::new(MockCompletion::failing("internal error"));

    let err = parts.classifier().classify("a cat").await.unwrap_err();
    assert!(matches!(err, ClassificationError::Unavailable(_)));
}

#[tokio::test]
async fn test_empty_prompt_skips_the_service() {
    let parts = PipelineParts::new(MockCompletion::verdict("low", &[]));

    let err = parts.classifier().classify("").await.unwrap_err();

    assert!(matches!(err, ClassificationError::EmptyPrompt));
    assert_eq!(parts.completion.call_count(), 0);
}

#[tokio::test]
async fn test_hanging_service_times_out() {
    let mut parts = PipelineParts::new(MockCompletion::hanging());
    parts.call_timeout = Duration::from_millis(50);

    let err = parts.classifier().classify("a cat").await.unwrap_err();
    assert!(matches!(err, ClassificationError::Timeout(_)));
}
