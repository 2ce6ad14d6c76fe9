// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Supported chain parameters for wallet writes and public registry reads

use serde::{Deserialize, Serialize};
use std::env;

pub const BNB_TESTNET_CHAIN_ID: u64 = 97;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub name: String,
    pub native_currency: NativeCurrency,
    /// RPC endpoints handed to the wallet when the chain has to be added
    pub wallet_rpc_urls: Vec<String>,
    /// Fixed endpoint for read-only queries, independent of wallet state
    pub public_rpc_url: String,
    pub explorer_url: String,
}

/// EIP-3085 `wallet_addEthereumChain` parameter object
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParameters {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl ChainConfig {
    pub fn bnb_testnet() -> Self {
        ChainConfig {
            chain_id: BNB_TESTNET_CHAIN_ID,
            name: "BNB Smart Chain Testnet".to_string(),
            native_currency: NativeCurrency {
                name: "tBNB".to_string(),
                symbol: "tBNB".to_string(),
                decimals: 18,
            },
            wallet_rpc_urls: vec!["https://data-seed-prebsc-1-s1.binance.org:8545".to_string()],
            public_rpc_url: env::var("PUBLIC_RPC_URL")
                .unwrap_or_else(|_| "https://bsc-testnet.bnbchain.org".to_string()),
            explorer_url: "https://testnet.bscscan.com".to_string(),
        }
    }

    /// Chain id in the `0x`-prefixed hex form wallets expect
    pub fn chain_id_hex(&self) -> String {
        format!("{:#x}", self.chain_id)
    }

    pub fn is_supported(&self, chain_id: u64) -> bool {
        self.chain_id == chain_id
    }

    pub fn add_chain_parameters(&self) -> AddChainParameters {
        AddChainParameters {
            chain_id: self.chain_id_hex(),
            chain_name: self.name.clone(),
            native_currency: self.native_currency.clone(),
            rpc_urls: self.wallet_rpc_urls.clone(),
            block_explorer_urls: vec![self.explorer_url.clone()],
        }
    }

    pub fn wrong_network_advisory(&self) -> String {
        format!(
            "Please switch to {} in your wallet to use this app.",
            self.name
        )
    }

    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), tx_hash)
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::bnb_testnet()
    }
}
