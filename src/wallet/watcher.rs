// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Polls the wallet for account and chain changes

use ethers::types::Address;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::connection::{WalletConnection, WalletEvent};

/// Events implied by the difference between the handle's view and the wallet's
pub fn detect_events(
    known_account: Option<Address>,
    known_chain: Option<u64>,
    accounts: &[Address],
    chain_id: u64,
) -> Vec<WalletEvent> {
    let mut events = Vec::new();
    if accounts.first().copied() != known_account {
        events.push(WalletEvent::AccountsChanged(accounts.to_vec()));
    }
    if !accounts.is_empty() && known_chain != Some(chain_id) {
        events.push(WalletEvent::ChainChanged(chain_id));
    }
    events
}

/// Apply events computed from a snapshot of `(account, chain_id)`. Nothing is
/// applied if the handle moved on while the wallet was being polled.
pub fn apply_polled_events(
    conn: &mut WalletConnection,
    seen_account: Option<Address>,
    seen_chain: Option<u64>,
    events: Vec<WalletEvent>,
) -> bool {
    if conn.account() != seen_account || conn.chain_id() != seen_chain {
        debug!("Wallet state changed during poll, dropping stale events");
        return false;
    }
    for event in events {
        debug!(?event, "Applying wallet event");
        conn.apply_event(event);
    }
    true
}

/// Run until `cancel` fires, translating wallet changes into [`WalletEvent`]s
pub async fn watch_wallet(
    connection: Arc<RwLock<WalletConnection>>,
    interval: Duration,
    cancel: CancellationToken,
) {
    info!(interval_ms = interval.as_millis() as u64, "Wallet watcher started");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }

        let (provider, account, chain_id) = {
            let conn = connection.read().await;
            if !conn.is_connected() {
                continue;
            }
            (conn.provider(), conn.account(), conn.chain_id())
        };

        let accounts = match provider.accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                debug!("Wallet poll failed: {}", e);
                continue;
            }
        };
        let current_chain = match provider.chain_id().await {
            Ok(id) => id,
            Err(e) => {
                debug!("Wallet chain poll failed: {}", e);
                continue;
            }
        };

        let events = detect_events(account, chain_id, &accounts, current_chain);
        if events.is_empty() {
            continue;
        }
        let mut conn = connection.write().await;
        apply_polled_events(&mut conn, account, chain_id, events);
    }
    info!("Wallet watcher stopped");
}
