// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wallet provider backed by a JSON-RPC wallet bridge

use async_trait::async_trait;
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::Address;
use serde_json::{json, Value};

use super::provider::{WalletError, WalletProvider};
use crate::config::AddChainParameters;

/// Forwards EIP-1193 requests to a wallet that exposes them over HTTP JSON-RPC
/// (a local signer bridge such as Frame). Signing prompts happen in the wallet.
pub struct JsonRpcWallet {
    provider: Provider<Http>,
}

impl JsonRpcWallet {
    pub fn new(rpc_url: &str) -> Result<Self, WalletError> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| WalletError::Transport(format!("invalid wallet URL: {}", e)))?;
        Ok(Self { provider })
    }

    pub fn provider(&self) -> &Provider<Http> {
        &self.provider
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.provider.request("eth_requestAccounts", ()).await?)
    }

    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.provider.get_accounts().await?)
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        let chain_id = self.provider.get_chainid().await?;
        Ok(chain_id.low_u64())
    }

    async fn switch_chain(&self, chain_id_hex: &str) -> Result<(), WalletError> {
        let _: Value = self
            .provider
            .request(
                "wallet_switchEthereumChain",
                [json!({ "chainId": chain_id_hex })],
            )
            .await?;
        Ok(())
    }

    async fn add_chain(&self, params: &AddChainParameters) -> Result<(), WalletError> {
        let _: Value = self
            .provider
            .request("wallet_addEthereumChain", [params])
            .await?;
        Ok(())
    }
}
