// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the ZorAi node

/// Full version string with feature description
pub const VERSION: &str = "v1.0.0-risk-registry-2025-10-20";

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.0.0";

pub const VERSION_MAJOR: u32 = 1;
pub const VERSION_MINOR: u32 = 0;
pub const VERSION_PATCH: u32 = 0;

/// Build date
pub const BUILD_DATE: &str = "2025-10-20";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "prompt-risk-classification",
    "two-tier-image-synthesis",
    "ipfs-pinning",
    "on-chain-risk-registry",
    "wallet-chain-guard",
    "prompt-log",
];

/// Supported chain IDs
pub const SUPPORTED_CHAINS: &[u64] = &[
    97, // BNB Smart Chain Testnet
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("ZorAi Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
        "chains": SUPPORTED_CHAINS,
    })
}
