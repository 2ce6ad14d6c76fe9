// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

use crate::storage::PinnedContent;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinResponse {
    pub success: bool,
    pub cid: String,
    pub gateway_url: String,
}

impl From<PinnedContent> for PinResponse {
    fn from(pinned: PinnedContent) -> Self {
        Self {
            success: true,
            cid: pinned.cid,
            gateway_url: pinned.gateway_url,
        }
    }
}
