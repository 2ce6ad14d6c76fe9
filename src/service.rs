// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wires configured collaborators into the services shared by the server and the CLI

use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::ZoraiConfig;
use crate::contracts::{EthersRegistry, ImageRegistry, RegistryReader};
use crate::diffusion::{ImageSynthesizer, OpenAiImageClient, TierSettings};
use crate::openai::{OpenAiChatClient, TextCompletion};
use crate::pipeline::GenerationPipeline;
use crate::registration::RegistrationGate;
use crate::safety::{ClassifierSettings, PromptRiskClassifier};
use crate::storage::{
    ChatHistoryStore, ContentPinner, HttpContentFetcher, PinataClient, PinningService,
};
use crate::wallet::{JsonRpcWallet, WalletConnection};

pub struct ZoraiServices {
    pub config: Arc<ZoraiConfig>,
    pub completion: Arc<dyn TextCompletion>,
    pub pipeline: Arc<GenerationPipeline>,
    pub chat_history: Arc<ChatHistoryStore>,
    pub wallet: Option<Arc<RwLock<WalletConnection>>>,
    pub registry_reader: Option<Arc<dyn RegistryReader>>,
}

/// Read-only registry over the public RPC, independent of any wallet
pub fn registry_reader(config: &ZoraiConfig) -> Result<Option<Arc<dyn RegistryReader>>> {
    match config.contract_address {
        Some(address) => {
            let registry = EthersRegistry::new(address, &config.chain.public_rpc_url, None)?;
            Ok(Some(Arc::new(registry)))
        }
        None => Ok(None),
    }
}

impl ZoraiServices {
    pub fn from_config(config: ZoraiConfig) -> Result<Self> {
        config.validate().map_err(|e| anyhow!(e))?;
        let api_key = config
            .openai
            .api_key
            .clone()
            .ok_or_else(|| anyhow!("OPENAI_API_KEY is not set in environment variables"))?;
        let openai = &config.openai;
        let timeouts = &config.timeouts;

        let completion: Arc<dyn TextCompletion> = Arc::new(OpenAiChatClient::new(
            &openai.base_url,
            &api_key,
            timeouts.completion,
        )?);
        let classifier = Arc::new(PromptRiskClassifier::new(
            completion.clone(),
            ClassifierSettings {
                model: openai.risk_model.clone(),
                timeout: timeouts.completion,
                ..ClassifierSettings::default()
            },
        ));

        let image_client = Arc::new(OpenAiImageClient::new(
            &openai.base_url,
            &api_key,
            timeouts.image,
        )?);
        let primary = TierSettings {
            model: openai.image_primary_model.clone(),
            size: openai.image_size.clone(),
            ..TierSettings::dall_e_3()
        };
        let fallback = TierSettings {
            model: openai.image_fallback_model.clone(),
            size: openai.image_size.clone(),
            ..TierSettings::dall_e_2()
        };
        let synthesizer = Arc::new(ImageSynthesizer::new(
            image_client,
            primary,
            fallback,
            timeouts.image,
        ));

        let pinning: Option<Arc<dyn PinningService>> = match config.pinata.jwt {
            Some(ref jwt) => Some(Arc::new(PinataClient::new(
                &config.pinata.api_url,
                jwt,
                timeouts.pin,
            )?)),
            None => {
                info!("PINATA_JWT not set, flagged images will not be pinned");
                None
            }
        };
        let pinner = Arc::new(ContentPinner::new(
            Arc::new(HttpContentFetcher::new(timeouts.pin)?),
            pinning,
            &config.pinata.gateway_url,
            timeouts.pin,
        ));

        let writer: Option<Arc<dyn ImageRegistry>> =
            match (config.contract_address, config.wallet_rpc_url.as_deref()) {
                (Some(address), Some(wallet_url)) => Some(Arc::new(EthersRegistry::new(
                    address,
                    &config.chain.public_rpc_url,
                    Some(wallet_url),
                )?)),
                _ => {
                    info!("Contract address or wallet bridge missing, registration disabled");
                    None
                }
            };
        let gate = Arc::new(RegistrationGate::new(writer, timeouts.registration));

        let wallet = match config.wallet_rpc_url.as_deref() {
            Some(url) => Some(Arc::new(RwLock::new(WalletConnection::new(
                Arc::new(JsonRpcWallet::new(url)?),
                config.chain.clone(),
            )))),
            None => None,
        };

        let registry_reader = registry_reader(&config)?;
        let chat_history = Arc::new(ChatHistoryStore::new(config.chat_history_path.clone()));
        let pipeline = Arc::new(GenerationPipeline::new(synthesizer, classifier, pinner, gate));

        Ok(Self {
            config: Arc::new(config),
            completion,
            pipeline,
            chat_history,
            wallet,
            registry_reader,
        })
    }
}
