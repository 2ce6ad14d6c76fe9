// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Decides whether a generated image is registered on chain and performs the write

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::contracts::{ImageRegistry, RegistryError, RegistrationRequest};
use crate::pipeline::GeneratedImage;
use crate::safety::RiskLevel;
use crate::storage::cid::is_valid_cid;
use crate::wallet::{WalletConnection, WalletError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    LowRisk,
    NotPinned,
    NoRegistry,
    NoWallet,
    WalletNotConnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationFailure {
    UserRejected,
    WrongNetwork,
    NotConnected,
    TransactionFailed,
    Connectivity,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegistrationOutcome {
    Skipped {
        reason: SkipReason,
    },
    Registered {
        #[serde(rename = "txHash")]
        tx_hash: String,
        #[serde(rename = "blockNumber")]
        block_number: Option<u64>,
    },
    Failed {
        kind: RegistrationFailure,
        message: String,
    },
}

impl RegistrationOutcome {
    fn failed(kind: RegistrationFailure, message: impl Into<String>) -> Self {
        RegistrationOutcome::Failed {
            kind,
            message: message.into(),
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self, RegistrationOutcome::Registered { .. })
    }

    /// User-facing note for outcomes that leave a flagged image unregistered
    pub fn warning(&self) -> Option<String> {
        match self {
            RegistrationOutcome::Failed { message, .. } => {
                Some(format!("Image was not registered on chain: {}", message))
            }
            RegistrationOutcome::Skipped {
                reason: SkipReason::NoWallet | SkipReason::WalletNotConnected,
            } => Some("Connect a wallet to register flagged images on chain.".to_string()),
            _ => None,
        }
    }
}

impl From<RegistryError> for RegistrationOutcome {
    fn from(err: RegistryError) -> Self {
        let kind = match err {
            RegistryError::UserRejected(_) => RegistrationFailure::UserRejected,
            RegistryError::Connectivity(_) => RegistrationFailure::Connectivity,
            RegistryError::Timeout => RegistrationFailure::Timeout,
            RegistryError::NotConfigured => {
                return RegistrationOutcome::Skipped {
                    reason: SkipReason::NoRegistry,
                }
            }
            RegistryError::TransactionFailed(_) | RegistryError::Decode(_) => {
                RegistrationFailure::TransactionFailed
            }
        };
        RegistrationOutcome::failed(kind, err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationDecision {
    Submit { severity: u8 },
    Skip(SkipReason),
}

/// Only medium or high risk images that were pinned under a recognised CID qualify
pub fn decide(risk_level: RiskLevel, ipfs_hash: Option<&str>) -> RegistrationDecision {
    if !risk_level.requires_registration() {
        return RegistrationDecision::Skip(SkipReason::LowRisk);
    }
    match ipfs_hash {
        Some(cid) if is_valid_cid(cid) => RegistrationDecision::Submit {
            severity: risk_level.severity_code(),
        },
        _ => RegistrationDecision::Skip(SkipReason::NotPinned),
    }
}

pub struct RegistrationGate {
    registry: Option<Arc<dyn ImageRegistry>>,
    timeout: Duration,
}

impl RegistrationGate {
    pub fn new(registry: Option<Arc<dyn ImageRegistry>>, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    pub fn is_configured(&self) -> bool {
        self.registry.is_some()
    }

    pub async fn register(
        &self,
        image: &GeneratedImage,
        wallet: Option<&RwLock<WalletConnection>>,
    ) -> RegistrationOutcome {
        let severity = match decide(image.risk_level, image.ipfs_hash.as_deref()) {
            RegistrationDecision::Skip(reason) => {
                return RegistrationOutcome::Skipped { reason };
            }
            RegistrationDecision::Submit { severity } => severity,
        };

        let Some(registry) = self.registry.as_ref() else {
            return RegistrationOutcome::Skipped {
                reason: SkipReason::NoRegistry,
            };
        };
        let Some(wallet) = wallet else {
            return RegistrationOutcome::Skipped {
                reason: SkipReason::NoWallet,
            };
        };

        let account = match tokio::time::timeout(self.timeout, wallet.read()).await {
            Ok(conn) => conn.write_account(),
            Err(_) => {
                warn!(image_id = %image.id, "Wallet busy, registration timed out");
                return RegistrationOutcome::from(RegistryError::Timeout);
            }
        };
        let from = match account {
            Ok(account) => account,
            Err(WalletError::NotConnected) => {
                return RegistrationOutcome::Skipped {
                    reason: SkipReason::WalletNotConnected,
                };
            }
            Err(e @ WalletError::WrongNetwork { .. }) => {
                warn!(image_id = %image.id, "Registration blocked: {}", e);
                return RegistrationOutcome::failed(RegistrationFailure::WrongNetwork, e.to_string());
            }
            Err(e) => {
                return RegistrationOutcome::failed(RegistrationFailure::NotConnected, e.to_string());
            }
        };

        let request = RegistrationRequest {
            image_id: image.id.clone(),
            model_used: image.model_used.clone(),
            ipfs_hash: image.ipfs_hash.clone().unwrap_or_default(),
            severity,
            reasons: image.reasons.clone(),
        };

        info!(image_id = %image.id, severity, "Registering flagged image");
        match tokio::time::timeout(self.timeout, registry.register_image(from, &request)).await {
            Err(_) => {
                warn!(image_id = %image.id, "Registration timed out");
                RegistrationOutcome::from(RegistryError::Timeout)
            }
            Ok(Err(e)) => {
                warn!(image_id = %image.id, "Registration failed: {}", e);
                RegistrationOutcome::from(e)
            }
            Ok(Ok(receipt)) => {
                info!(image_id = %image.id, tx_hash = %receipt.tx_hash, "Image registered");
                RegistrationOutcome::Registered {
                    tx_hash: receipt.tx_hash,
                    block_number: receipt.block_number,
                }
            }
        }
    }
}
