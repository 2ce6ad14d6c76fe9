// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Explicit wallet connection handle
//!
//! Holds the connected account, the wallet's current chain and whether
//! chain-bound writes are allowed. Wallet-originated changes arrive as
//! [`WalletEvent`]s; a chain change re-derives every chain-bound binding
//! instead of reloading the process.

use ethers::types::Address;
use ethers::utils::to_checksum;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::chain_guard::{ensure_supported_chain, GuardOutcome};
use super::provider::{WalletError, WalletProvider};
use crate::config::ChainConfig;

pub const CONNECT_REJECTED_MESSAGE: &str = "Please connect your wallet to continue.";

#[derive(Debug, Clone, PartialEq)]
pub enum WalletEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletStatus {
    pub is_connected: bool,
    pub account: Option<String>,
    pub chain_id: Option<u64>,
    pub supported_chain_id: u64,
    pub writes_enabled: bool,
    pub advisory: Option<String>,
    /// Bumped whenever chain-bound state is re-derived
    pub bindings_epoch: u64,
}

pub struct WalletConnection {
    provider: Arc<dyn WalletProvider>,
    chain: ChainConfig,
    account: Option<Address>,
    chain_id: Option<u64>,
    writes_enabled: bool,
    advisory: Option<String>,
    bindings_epoch: u64,
}

impl WalletConnection {
    pub fn new(provider: Arc<dyn WalletProvider>, chain: ChainConfig) -> Self {
        Self {
            provider,
            chain,
            account: None,
            chain_id: None,
            writes_enabled: false,
            advisory: None,
            bindings_epoch: 0,
        }
    }

    pub fn provider(&self) -> Arc<dyn WalletProvider> {
        self.provider.clone()
    }

    pub fn chain(&self) -> &ChainConfig {
        &self.chain
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    pub fn writes_enabled(&self) -> bool {
        self.writes_enabled
    }

    pub fn bindings_epoch(&self) -> u64 {
        self.bindings_epoch
    }

    /// Request accounts, then run the chain guard. A declined switch leaves the
    /// connection up with writes disabled and an advisory set.
    pub async fn connect(&mut self) -> Result<WalletStatus, WalletError> {
        let requested = self.provider.request_accounts().await;
        self.begin_session(requested)?;

        let chain_id = self.provider.chain_id().await?;
        self.reset_chain_bindings(chain_id);

        if !self.writes_enabled {
            if let Err(e) = self.run_chain_guard().await {
                warn!("Network switch declined or failed: {}", e);
            }
        }
        Ok(self.status())
    }

    pub fn disconnect(&mut self) {
        if self.account.is_some() {
            info!("Wallet disconnected");
        }
        self.account = None;
        self.chain_id = None;
        self.writes_enabled = false;
        self.advisory = None;
    }

    /// Explicit network switch requested by the user
    pub async fn switch_network(&mut self) -> Result<GuardOutcome, WalletError> {
        if !self.is_connected() {
            return Err(WalletError::NotConnected);
        }
        self.run_chain_guard().await
    }

    pub fn apply_event(&mut self, event: WalletEvent) {
        match event {
            WalletEvent::AccountsChanged(accounts) => match accounts.first() {
                None => self.disconnect(),
                Some(account) if self.is_connected() => {
                    info!(account = %to_checksum(account, None), "Wallet account changed");
                    self.account = Some(*account);
                }
                Some(_) => {}
            },
            WalletEvent::ChainChanged(chain_id) => {
                if self.is_connected() {
                    self.reset_chain_bindings(chain_id);
                }
            }
        }
    }

    /// Re-derive everything that depends on the wallet's chain
    pub fn reset_chain_bindings(&mut self, chain_id: u64) {
        self.chain_id = Some(chain_id);
        self.writes_enabled = self.chain.is_supported(chain_id);
        self.advisory = if self.writes_enabled {
            None
        } else {
            Some(self.chain.wrong_network_advisory())
        };
        self.bindings_epoch += 1;
        info!(
            chain_id,
            writes_enabled = self.writes_enabled,
            epoch = self.bindings_epoch,
            "Chain bindings reset"
        );
    }

    /// Account allowed to sign a chain-bound write right now
    pub fn write_account(&self) -> Result<Address, WalletError> {
        let account = self.account.ok_or(WalletError::NotConnected)?;
        match self.chain_id {
            Some(chain_id) if self.chain.is_supported(chain_id) => Ok(account),
            actual => Err(WalletError::WrongNetwork {
                expected: self.chain.chain_id,
                actual,
            }),
        }
    }

    pub fn status(&self) -> WalletStatus {
        WalletStatus {
            is_connected: self.is_connected(),
            account: self.account.map(|a| to_checksum(&a, None)),
            chain_id: self.chain_id,
            supported_chain_id: self.chain.chain_id,
            writes_enabled: self.writes_enabled,
            advisory: self.advisory.clone(),
            bindings_epoch: self.bindings_epoch,
        }
    }

    async fn run_chain_guard(&mut self) -> Result<GuardOutcome, WalletError> {
        let result = guard_chain(self.provider.as_ref(), &self.chain).await;
        self.finish_guard(result)
    }

    /// Record the outcome of an account request
    fn begin_session(
        &mut self,
        requested: Result<Vec<Address>, WalletError>,
    ) -> Result<Address, WalletError> {
        let accounts = match requested {
            Ok(accounts) => accounts,
            Err(e) if e.is_user_rejected() => {
                self.disconnect();
                return Err(WalletError::UserRejected(
                    CONNECT_REJECTED_MESSAGE.to_string(),
                ));
            }
            Err(e) => {
                self.disconnect();
                return Err(e);
            }
        };

        let Some(account) = accounts.first().copied() else {
            self.disconnect();
            return Err(WalletError::NoAccounts);
        };
        self.account = Some(account);
        info!(account = %to_checksum(&account, None), "Wallet connected");
        Ok(account)
    }

    fn finish_guard(
        &mut self,
        result: Result<(GuardOutcome, u64), WalletError>,
    ) -> Result<GuardOutcome, WalletError> {
        match result {
            Ok((outcome, chain_id)) => {
                if self.is_connected() {
                    self.reset_chain_bindings(chain_id);
                }
                Ok(outcome)
            }
            Err(e) => {
                self.writes_enabled = false;
                self.advisory = Some(self.chain.wrong_network_advisory());
                Err(e)
            }
        }
    }
}

async fn guard_chain(
    provider: &dyn WalletProvider,
    chain: &ChainConfig,
) -> Result<(GuardOutcome, u64), WalletError> {
    let outcome = ensure_supported_chain(provider, chain).await?;
    let chain_id = provider.chain_id().await?;
    Ok((outcome, chain_id))
}

/// Connect through a shared handle. Wallet prompts are awaited without the
/// lock held; the lock is taken only to record each result.
pub async fn connect_shared(
    handle: &RwLock<WalletConnection>,
) -> Result<WalletStatus, WalletError> {
    let (provider, chain) = {
        let conn = handle.read().await;
        (conn.provider(), conn.chain.clone())
    };

    let requested = provider.request_accounts().await;
    let account = handle.write().await.begin_session(requested)?;

    let chain_id = provider.chain_id().await?;
    {
        let mut conn = handle.write().await;
        if conn.account() != Some(account) {
            debug!("Wallet session changed during connect");
            return Ok(conn.status());
        }
        conn.reset_chain_bindings(chain_id);
        if conn.writes_enabled() {
            return Ok(conn.status());
        }
    }

    let result = guard_chain(provider.as_ref(), &chain).await;
    let mut conn = handle.write().await;
    if let Err(e) = conn.finish_guard(result) {
        warn!("Network switch declined or failed: {}", e);
    }
    Ok(conn.status())
}

/// Explicit network switch through a shared handle, awaited without the lock held
pub async fn switch_network_shared(
    handle: &RwLock<WalletConnection>,
) -> Result<(GuardOutcome, WalletStatus), WalletError> {
    let (provider, chain) = {
        let conn = handle.read().await;
        if !conn.is_connected() {
            return Err(WalletError::NotConnected);
        }
        (conn.provider(), conn.chain.clone())
    };

    let result = guard_chain(provider.as_ref(), &chain).await;
    let mut conn = handle.write().await;
    let outcome = conn.finish_guard(result)?;
    Ok((outcome, conn.status()))
}
