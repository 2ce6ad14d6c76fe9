// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation via an OpenAI-compatible images API with tiered fallback

pub mod client;
pub mod synthesizer;

pub use client::{ImageGenError, ImageGenerationRequest, ImageGenerator, OpenAiImageClient};
pub use synthesizer::{ImageSynthesizer, ModelTier, SynthesizedImage, TierSettings};
