// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use ethers::contract::ContractError;
use ethers::providers::{Http, Provider, ProviderError, RpcError};
use thiserror::Error;

use crate::wallet::USER_REJECTED_CODE;

pub const REGISTRATION_REJECTED_MESSAGE: &str =
    "You rejected the transaction in your wallet. Please approve it to continue.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("{0}")]
    UserRejected(String),

    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    #[error("chain unreachable: {0}")]
    Connectivity(String),

    #[error("registry call timed out")]
    Timeout,

    #[error("registry contract not configured")]
    NotConfigured,

    #[error("unexpected contract response: {0}")]
    Decode(String),
}

/// Map a JSON-RPC error object from the chain or the signing wallet
pub fn classify_rpc_failure(code: i64, message: &str) -> RegistryError {
    let lower = message.to_lowercase();
    if code == USER_REJECTED_CODE
        || lower.contains("user rejected")
        || lower.contains("user denied")
    {
        RegistryError::UserRejected(REGISTRATION_REJECTED_MESSAGE.to_string())
    } else if lower.contains("insufficient funds") {
        RegistryError::TransactionFailed("Insufficient funds for transaction".to_string())
    } else {
        RegistryError::TransactionFailed(message.to_string())
    }
}

impl RegistryError {
    pub fn from_provider_error(err: ProviderError) -> Self {
        match err.as_error_response() {
            Some(response) => classify_rpc_failure(response.code, &response.message),
            None => RegistryError::Connectivity(err.to_string()),
        }
    }

    pub fn from_contract_error(err: ContractError<Provider<Http>>) -> Self {
        match err {
            ContractError::Revert(data) => {
                RegistryError::TransactionFailed(format!("execution reverted: {}", data))
            }
            ContractError::MiddlewareError { e } => Self::from_provider_error(e),
            ContractError::ProviderError { e } => Self::from_provider_error(e),
            other => RegistryError::Decode(other.to_string()),
        }
    }
}
