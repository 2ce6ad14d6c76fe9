// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod contracts;
pub mod diffusion;
pub mod openai;
pub mod pipeline;
pub mod registration;
pub mod safety;
pub mod service;
pub mod storage;
pub mod version;
pub mod wallet;

// Re-export main types
pub use config::{ChainConfig, ZoraiConfig};
pub use pipeline::{GeneratedImage, GenerationPipeline, GenerationRequest, GenerationResult};
pub use registration::RegistrationOutcome;
pub use safety::{RiskLevel, RiskVerdict};
pub use service::ZoraiServices;
pub use wallet::WalletConnection;
