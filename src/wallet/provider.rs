// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! EIP-1193 wallet boundary and its error taxonomy

use async_trait::async_trait;
use ethers::providers::{ProviderError, RpcError};
use ethers::types::Address;
use thiserror::Error;

use crate::config::AddChainParameters;

/// EIP-1193 "user rejected request"
pub const USER_REJECTED_CODE: i64 = 4001;
/// EIP-3326 "unrecognized chain id"
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("{0}")]
    UserRejected(String),

    #[error("No accounts found. Please connect your wallet.")]
    NoAccounts,

    #[error("wallet is not connected")]
    NotConnected,

    #[error("wrong network: expected chain {expected}, wallet is on {actual:?}")]
    WrongNetwork { expected: u64, actual: Option<u64> },

    #[error("chain {0} is not known to the wallet")]
    UnrecognizedChain(String),

    #[error("wallet returned error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("wallet unreachable: {0}")]
    Transport(String),
}

impl WalletError {
    /// Map a JSON-RPC error object returned by the wallet
    pub fn from_rpc(code: i64, message: &str) -> Self {
        let lower = message.to_lowercase();
        if code == USER_REJECTED_CODE
            || lower.contains("user rejected")
            || lower.contains("user denied")
        {
            WalletError::UserRejected(message.to_string())
        } else if code == UNRECOGNIZED_CHAIN_CODE {
            WalletError::UnrecognizedChain(message.to_string())
        } else {
            WalletError::Rpc {
                code,
                message: message.to_string(),
            }
        }
    }

    pub fn is_user_rejected(&self) -> bool {
        matches!(self, WalletError::UserRejected(_))
    }
}

impl From<ProviderError> for WalletError {
    fn from(err: ProviderError) -> Self {
        match err.as_error_response() {
            Some(response) => WalletError::from_rpc(response.code, &response.message),
            None => WalletError::Transport(err.to_string()),
        }
    }
}

/// Requests a connected wallet understands
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// `eth_requestAccounts`: may prompt the user
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// `eth_accounts`: never prompts
    async fn accounts(&self) -> Result<Vec<Address>, WalletError>;

    async fn chain_id(&self) -> Result<u64, WalletError>;

    /// `wallet_switchEthereumChain`
    async fn switch_chain(&self, chain_id_hex: &str) -> Result<(), WalletError>;

    /// `wallet_addEthereumChain`
    async fn add_chain(&self, params: &AddChainParameters) -> Result<(), WalletError>;
}
