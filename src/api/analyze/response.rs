// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

use crate::safety::RiskVerdict;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzePromptResponse {
    pub success: bool,
    pub data: RiskVerdict,
}
