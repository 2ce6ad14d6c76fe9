// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Content pinning to IPFS and the local prompt log

pub mod chat_history;
pub mod cid;
pub mod pinata;
pub mod pinner;

pub use chat_history::{ChatEntry, ChatHistoryStore, PromptLogError};
pub use pinata::{ContentFetcher, HttpContentFetcher, PinataClient, PinningService};
pub use pinner::{ContentPinner, PinnedContent};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PinError {
    #[error("invalid image URL: {0}")]
    InvalidUrl(String),

    #[error("failed to fetch image: {0}")]
    Fetch(String),

    #[error("pinning service returned {status}: {message}")]
    Upload { status: u16, message: String },

    #[error("pinning service unreachable: {0}")]
    Transport(String),

    #[error("pinning service returned an unrecognised content identifier: {0}")]
    InvalidCid(String),

    #[error("pinning service not configured")]
    NotConfigured,

    #[error("pinning timed out")]
    Timeout,
}
