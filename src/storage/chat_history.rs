// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Flat-file prompt log backing the chat-history route

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum PromptLogError {
    #[error("failed to write chat history: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to encode chat history: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to read chat history: {0}")]
    Read(std::io::Error),

    #[error("chat history at {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub id: String,
    pub prompt: String,
    pub response: String,
    pub timestamp: String,
}

impl ChatEntry {
    pub fn new(prompt: &str, response: &str) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            prompt: prompt.to_string(),
            response: response.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// JSON array of [`ChatEntry`] on disk. Appends are serialised within the process.
pub struct ChatHistoryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ChatHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries. A missing or unreadable file reads as an empty log.
    pub async fn read_all(&self) -> Vec<ChatEntry> {
        match self.load().await {
            Ok(entries) => entries,
            Err(e @ PromptLogError::Corrupt { .. }) => {
                warn!("{}", e);
                Vec::new()
            }
            Err(e) => {
                error!(path = %self.path.display(), "Error reading chat history: {}", e);
                Vec::new()
            }
        }
    }

    /// Strict read used before rewriting the file; only a missing file is empty
    async fn load(&self) -> Result<Vec<ChatEntry>, PromptLogError> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PromptLogError::Read(e)),
        };
        serde_json::from_str(&data).map_err(|e| PromptLogError::Corrupt {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Append one entry. An unreadable or corrupt log is left untouched and
    /// reported instead of being overwritten.
    pub async fn append(&self, entry: ChatEntry) -> Result<ChatEntry, PromptLogError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await?;
        entries.push(entry.clone());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let encoded = serde_json::to_string_pretty(&entries)?;
        tokio::fs::write(&self.path, encoded).await?;
        Ok(entry)
    }
}
