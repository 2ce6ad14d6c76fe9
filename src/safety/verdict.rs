// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Risk verdict types produced by the prompt risk classifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk level assigned to a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self::Low
    }
}

impl RiskLevel {
    /// Integer severity stored in the on-chain record
    pub fn severity_code(self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
        }
    }

    pub fn from_severity_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(RiskLevel::Low),
            1 => Some(RiskLevel::Medium),
            2 => Some(RiskLevel::High),
            _ => None,
        }
    }

    /// Medium and high risk images are registered on chain
    pub fn requires_registration(self) -> bool {
        matches!(self, RiskLevel::Medium | RiskLevel::High)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured classification of a prompt
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskVerdict {
    pub is_risky: bool,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl RiskVerdict {
    /// Verdict used whenever the classifier output cannot be trusted
    pub fn fail_closed() -> Self {
        Self::default()
    }
}
