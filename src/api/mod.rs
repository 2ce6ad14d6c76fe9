// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod analyze;
pub mod chat_history;
pub mod errors;
pub mod generate_image;
pub mod handlers;
pub mod http_server;
pub mod pin;
pub mod registry;
pub mod wallet;

pub use analyze::{analyze_prompt_handler, AnalyzePromptRequest, AnalyzePromptResponse};
pub use errors::{ApiError, ErrorResponse};
pub use generate_image::{generate_image_handler, GenerateImageRequest, GenerateImageResponse};
pub use handlers::{HealthResponse, TestEnvResponse};
pub use http_server::{create_app, start_server, AppState};
pub use pin::{upload_to_pinata_handler, PinRequest, PinResponse};
