// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wallet session: connection handle, chain guard and change watcher

pub mod chain_guard;
pub mod connection;
pub mod json_rpc;
pub mod provider;
pub mod watcher;

pub use chain_guard::{ensure_supported_chain, GuardOutcome};
pub use connection::{
    connect_shared, switch_network_shared, WalletConnection, WalletEvent, WalletStatus,
    CONNECT_REJECTED_MESSAGE,
};
pub use json_rpc::JsonRpcWallet;
pub use provider::{WalletError, WalletProvider, UNRECOGNIZED_CHAIN_CODE, USER_REJECTED_CODE};
pub use watcher::{apply_polled_events, detect_events, watch_wallet};
