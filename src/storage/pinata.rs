// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Pinata pinning service and remote image fetching

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::PinError;

/// Boundary to a content-addressed pinning service
#[async_trait]
pub trait PinningService: Send + Sync {
    /// Upload bytes and return the content identifier reported by the service
    async fn pin_file(&self, bytes: Vec<u8>, file_name: &str) -> Result<String, PinError>;
}

/// Fetches raw bytes behind a remote URL
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PinError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PinFileResponse {
    ipfs_hash: String,
}

pub struct PinataClient {
    client: Client,
    api_url: String,
    jwt: String,
}

impl PinataClient {
    pub fn new(api_url: &str, jwt: &str, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_url: api_url.trim_end_matches('/').to_string(),
            jwt: jwt.to_string(),
        })
    }
}

fn transport_error(e: reqwest::Error) -> PinError {
    if e.is_timeout() {
        PinError::Timeout
    } else {
        PinError::Transport(e.to_string())
    }
}

#[async_trait]
impl PinningService for PinataClient {
    async fn pin_file(&self, bytes: Vec<u8>, file_name: &str) -> Result<String, PinError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("image/png")
            .map_err(|e| PinError::Transport(e.to_string()))?;
        let form = Form::new().part("file", part);

        let url = format!("{}/pinning/pinFileToIPFS", self.api_url);
        debug!("Pinata upload POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PinError::Upload {
                status: status.as_u16(),
                message,
            });
        }

        let data: PinFileResponse = response.json().await.map_err(|e| PinError::Upload {
            status: status.as_u16(),
            message: format!("JSON parse error: {}", e),
        })?;
        Ok(data.ipfs_hash)
    }
}

pub struct HttpContentFetcher {
    client: Client,
}

impl HttpContentFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait]
impl ContentFetcher for HttpContentFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PinError> {
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(PinError::Fetch(format!("{} returned {}", url, status)));
        }
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(bytes.to_vec())
    }
}
