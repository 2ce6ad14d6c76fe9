// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration loaded from environment variables

pub mod chains;

pub use chains::{AddChainParameters, ChainConfig, NativeCurrency, BNB_TESTNET_CHAIN_ID};

use ethers::types::Address;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_PINATA_API_URL: &str = "https://api.pinata.cloud";
pub const DEFAULT_IPFS_GATEWAY_URL: &str = "https://gateway.pinata.cloud";

/// OpenAI settings shared by the risk classifier, prompt log and image tiers
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub risk_model: String,
    pub chat_model: String,
    pub image_primary_model: String,
    pub image_fallback_model: String,
    pub image_size: String,
}

#[derive(Debug, Clone)]
pub struct PinataConfig {
    /// Bearer credential; stays server-side
    pub jwt: Option<String>,
    pub api_url: String,
    pub gateway_url: String,
}

/// Per-call timeouts for every remote collaborator
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    pub completion: Duration,
    pub image: Duration,
    pub pin: Duration,
    pub registration: Duration,
}

#[derive(Debug, Clone)]
pub struct ZoraiConfig {
    pub openai: OpenAiConfig,
    pub pinata: PinataConfig,
    pub chain: ChainConfig,
    pub contract_address: Option<Address>,
    /// CONTRACT_ADDRESS exactly as configured, kept for validation
    pub contract_address_input: Option<String>,
    /// JSON-RPC endpoint of the wallet bridge that signs registrations
    pub wallet_rpc_url: Option<String>,
    pub wallet_poll_interval: Duration,
    pub chat_history_path: PathBuf,
    pub api_port: u16,
    pub app_url: Option<String>,
    pub environment: Option<String>,
    pub timeouts: TimeoutConfig,
}

fn env_secs(key: &str, default: u64) -> Duration {
    Duration::from_secs(
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default),
    )
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl ZoraiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let contract_address_input = env_non_empty("CONTRACT_ADDRESS");
        Self {
            openai: OpenAiConfig {
                api_key: env_non_empty("OPENAI_API_KEY"),
                base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.openai.base_url),
                risk_model: env::var("RISK_MODEL").unwrap_or(defaults.openai.risk_model),
                chat_model: env::var("CHAT_MODEL").unwrap_or(defaults.openai.chat_model),
                image_primary_model: env::var("IMAGE_PRIMARY_MODEL")
                    .unwrap_or(defaults.openai.image_primary_model),
                image_fallback_model: env::var("IMAGE_FALLBACK_MODEL")
                    .unwrap_or(defaults.openai.image_fallback_model),
                image_size: env::var("IMAGE_SIZE").unwrap_or(defaults.openai.image_size),
            },
            pinata: PinataConfig {
                jwt: env_non_empty("PINATA_JWT"),
                api_url: env::var("PINATA_API_URL").unwrap_or(defaults.pinata.api_url),
                gateway_url: env::var("IPFS_GATEWAY_URL").unwrap_or(defaults.pinata.gateway_url),
            },
            chain: ChainConfig::bnb_testnet(),
            contract_address: contract_address_input
                .as_deref()
                .and_then(|addr| Address::from_str(addr.trim()).ok()),
            contract_address_input,
            wallet_rpc_url: env_non_empty("WALLET_RPC_URL"),
            wallet_poll_interval: Duration::from_millis(
                env::var("WALLET_POLL_INTERVAL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(2000),
            ),
            chat_history_path: env::var("CHAT_HISTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.chat_history_path),
            api_port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.api_port),
            app_url: env_non_empty("APP_URL"),
            environment: env_non_empty("ENVIRONMENT"),
            timeouts: TimeoutConfig {
                completion: env_secs("COMPLETION_TIMEOUT_SECS", 30),
                image: env_secs("IMAGE_TIMEOUT_SECS", 120),
                pin: env_secs("PIN_TIMEOUT_SECS", 60),
                registration: env_secs("REGISTRATION_TIMEOUT_SECS", 180),
            },
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.openai.image_primary_model.trim().is_empty()
            || self.openai.image_fallback_model.trim().is_empty()
        {
            return Err("Image model names must not be empty".to_string());
        }
        if self.timeouts.completion.is_zero()
            || self.timeouts.image.is_zero()
            || self.timeouts.pin.is_zero()
            || self.timeouts.registration.is_zero()
        {
            return Err("Timeouts must be greater than 0".to_string());
        }
        if self.wallet_poll_interval.is_zero() {
            return Err("Wallet poll interval must be greater than 0".to_string());
        }
        if let Some(ref raw) = self.contract_address_input {
            Address::from_str(raw.trim())
                .map_err(|e| format!("Invalid CONTRACT_ADDRESS '{}': {}", raw, e))?;
        }
        if let Some(ref url) = self.wallet_rpc_url {
            url::Url::parse(url).map_err(|e| format!("Invalid WALLET_RPC_URL '{}': {}", url, e))?;
        }
        Ok(())
    }

    pub fn has_openai_key(&self) -> bool {
        self.openai.api_key.is_some()
    }
}

impl Default for ZoraiConfig {
    fn default() -> Self {
        Self {
            openai: OpenAiConfig {
                api_key: None,
                base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
                risk_model: "gpt-4".to_string(),
                chat_model: "gpt-3.5-turbo".to_string(),
                image_primary_model: "dall-e-3".to_string(),
                image_fallback_model: "dall-e-2".to_string(),
                image_size: "1024x1024".to_string(),
            },
            pinata: PinataConfig {
                jwt: None,
                api_url: DEFAULT_PINATA_API_URL.to_string(),
                gateway_url: DEFAULT_IPFS_GATEWAY_URL.to_string(),
            },
            chain: ChainConfig::bnb_testnet(),
            contract_address: None,
            contract_address_input: None,
            wallet_rpc_url: None,
            wallet_poll_interval: Duration::from_millis(2000),
            chat_history_path: PathBuf::from("data/chatHistory.json"),
            api_port: 3000,
            app_url: None,
            environment: None,
            timeouts: TimeoutConfig {
                completion: Duration::from_secs(30),
                image: Duration::from_secs(120),
                pin: Duration::from_secs(60),
                registration: Duration::from_secs(180),
            },
        }
    }
}
