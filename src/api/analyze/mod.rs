// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt risk analysis endpoint: POST /api/analyze-prompt

pub mod handler;
pub mod request;
pub mod response;

pub use handler::analyze_prompt_handler;
pub use request::AnalyzePromptRequest;
pub use response::AnalyzePromptResponse;
