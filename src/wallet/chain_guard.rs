// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Moves the wallet onto the supported chain, adding the chain first if the wallet lacks it

use serde::Serialize;
use tracing::{info, warn};

use super::provider::{WalletError, WalletProvider};
use crate::config::ChainConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardOutcome {
    AlreadyOnChain,
    Switched,
    AddedAndSwitched,
}

/// Ensure the wallet is on `chain`. A declined switch or add surfaces as
/// [`WalletError::UserRejected`]; the caller decides how to disable writes.
pub async fn ensure_supported_chain(
    wallet: &dyn WalletProvider,
    chain: &ChainConfig,
) -> Result<GuardOutcome, WalletError> {
    let current = wallet.chain_id().await?;
    if chain.is_supported(current) {
        return Ok(GuardOutcome::AlreadyOnChain);
    }

    info!(
        current,
        target = chain.chain_id,
        "Wallet on unsupported chain, requesting switch"
    );
    let chain_id_hex = chain.chain_id_hex();
    let outcome = match wallet.switch_chain(&chain_id_hex).await {
        Ok(()) => GuardOutcome::Switched,
        Err(WalletError::UnrecognizedChain(_)) => {
            info!(chain = %chain.name, "Chain unknown to wallet, adding it");
            wallet.add_chain(&chain.add_chain_parameters()).await?;
            wallet.switch_chain(&chain_id_hex).await?;
            GuardOutcome::AddedAndSwitched
        }
        Err(e) => return Err(e),
    };

    let after = wallet.chain_id().await?;
    if !chain.is_supported(after) {
        warn!(after, "Wallet still on unsupported chain after switch");
        return Err(WalletError::WrongNetwork {
            expected: chain.chain_id,
            actual: Some(after),
        });
    }
    Ok(outcome)
}
