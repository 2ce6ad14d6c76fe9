// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod generation;
pub mod types;

pub use generation::GenerationPipeline;
pub use types::{
    new_image_id, GeneratedImage, GenerationRequest, GenerationResult, PipelineError,
};
