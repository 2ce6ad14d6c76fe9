// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt risk classification

pub mod classifier;
pub mod verdict;

pub use classifier::{ClassificationError, ClassifierSettings, PromptRiskClassifier};
pub use verdict::{RiskLevel, RiskVerdict};
