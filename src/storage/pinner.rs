// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fetch-then-pin flow for generated images

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::cid::{gateway_url, is_valid_cid};
use super::pinata::{ContentFetcher, PinningService};
use super::PinError;

const PINNED_FILE_NAME: &str = "image.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedContent {
    pub cid: String,
    pub gateway_url: String,
}

pub struct ContentPinner {
    fetcher: Arc<dyn ContentFetcher>,
    pinning: Option<Arc<dyn PinningService>>,
    gateway: String,
    timeout: Duration,
}

impl ContentPinner {
    /// `pinning` is `None` when no credential is configured; every pin then fails with `NotConfigured`
    pub fn new(
        fetcher: Arc<dyn ContentFetcher>,
        pinning: Option<Arc<dyn PinningService>>,
        gateway: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            pinning,
            gateway: gateway.to_string(),
            timeout,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.pinning.is_some()
    }

    /// Download `image_url` and pin its bytes. A returned identifier outside the
    /// recognised CID schemes is a failure even if the upload itself succeeded.
    pub async fn pin_from_url(&self, image_url: &str) -> Result<PinnedContent, PinError> {
        let parsed =
            url::Url::parse(image_url).map_err(|e| PinError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PinError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }
        let pinning = self.pinning.as_ref().ok_or(PinError::NotConfigured)?;

        let bytes = tokio::time::timeout(self.timeout, self.fetcher.fetch(image_url))
            .await
            .map_err(|_| PinError::Timeout)??;

        let cid = tokio::time::timeout(self.timeout, pinning.pin_file(bytes, PINNED_FILE_NAME))
            .await
            .map_err(|_| PinError::Timeout)??;

        if !is_valid_cid(&cid) {
            warn!(cid = %cid, "Pinning service returned an unrecognised content identifier");
            return Err(PinError::InvalidCid(cid));
        }

        info!(cid = %cid, "Image pinned");
        Ok(PinnedContent {
            gateway_url: gateway_url(&self.gateway, &cid),
            cid,
        })
    }
}
