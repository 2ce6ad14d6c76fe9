// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use chrono::{SecondsFormat, TimeZone, Utc};
use ethers::prelude::*;
use ethers::utils::to_checksum;
use serde::{Deserialize, Serialize};

abigen!(
    ZorAiRegistry,
    r#"[
        {
            "inputs": [
                {"internalType": "string", "name": "imageId", "type": "string"},
                {"internalType": "string", "name": "modelUsed", "type": "string"},
                {"internalType": "string", "name": "ipfsHash", "type": "string"},
                {"internalType": "uint8", "name": "riskLevel", "type": "uint8"},
                {"internalType": "string[]", "name": "riskReasons", "type": "string[]"}
            ],
            "name": "registerImage",
            "outputs": [],
            "stateMutability": "nonpayable",
            "type": "function"
        },
        {
            "inputs": [{"internalType": "string", "name": "imageId", "type": "string"}],
            "name": "getImageData",
            "outputs": [
                {"internalType": "string", "name": "ipfsHash", "type": "string"},
                {"internalType": "string", "name": "modelUsed", "type": "string"},
                {"internalType": "address", "name": "creator", "type": "address"},
                {"internalType": "uint256", "name": "timestamp", "type": "uint256"},
                {"internalType": "bool", "name": "isVerified", "type": "bool"},
                {"internalType": "uint8", "name": "riskLevel", "type": "uint8"},
                {"internalType": "string[]", "name": "riskReasons", "type": "string[]"}
            ],
            "stateMutability": "view",
            "type": "function"
        },
        {
            "inputs": [],
            "name": "getTotalImages",
            "outputs": [{"internalType": "uint256", "name": "", "type": "uint256"}],
            "stateMutability": "view",
            "type": "function"
        },
        {
            "inputs": [{"internalType": "uint256", "name": "", "type": "uint256"}],
            "name": "registeredImages",
            "outputs": [{"internalType": "string", "name": "", "type": "string"}],
            "stateMutability": "view",
            "type": "function"
        },
        {
            "inputs": [],
            "name": "getHighRiskImages",
            "outputs": [{"internalType": "string[]", "name": "", "type": "string[]"}],
            "stateMutability": "view",
            "type": "function"
        }
    ]"#
);

/// Arguments of a `registerImage` transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub image_id: String,
    pub model_used: String,
    pub ipfs_hash: String,
    /// 1 = medium, 2 = high
    pub severity: u8,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub tx_hash: String,
    pub block_number: Option<u64>,
}

/// One row of the registry as returned by `getImageData`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredImage {
    pub image_id: String,
    pub ipfs_hash: String,
    pub model_used: String,
    pub creator: String,
    pub timestamp: String,
    pub is_verified: bool,
    pub risk_level: u8,
    pub risk_reasons: Vec<String>,
}

impl RegisteredImage {
    pub fn from_contract(
        image_id: &str,
        (ipfs_hash, model_used, creator, timestamp, is_verified, risk_level, risk_reasons): (
            String,
            String,
            Address,
            U256,
            bool,
            u8,
            Vec<String>,
        ),
    ) -> Self {
        let seconds = i64::try_from(timestamp.low_u64()).unwrap_or(i64::MAX);
        let timestamp = Utc
            .timestamp_opt(seconds, 0)
            .single()
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default();
        Self {
            image_id: image_id.to_string(),
            ipfs_hash,
            model_used,
            creator: to_checksum(&creator, None),
            timestamp,
            is_verified,
            risk_level,
            risk_reasons,
        }
    }
}
