// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hand-written doubles for every remote collaborator

#![allow(dead_code)]

use async_trait::async_trait;
use ethers::types::Address;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

use zorai_node::config::{AddChainParameters, ChainConfig};
use zorai_node::contracts::{
    ImageRegistry, RegisteredImage, RegistryError, RegistryReader, RegistrationReceipt,
    RegistrationRequest,
};
use zorai_node::diffusion::{
    ImageGenError, ImageGenerationRequest, ImageGenerator, ImageSynthesizer, TierSettings,
};
use zorai_node::openai::{CompletionError, CompletionRequest, TextCompletion};
use zorai_node::pipeline::GenerationPipeline;
use zorai_node::registration::RegistrationGate;
use zorai_node::safety::{ClassifierSettings, PromptRiskClassifier};
use zorai_node::storage::{ContentFetcher, ContentPinner, PinError, PinningService};
use zorai_node::wallet::{WalletConnection, WalletError, WalletProvider};

pub const CID_V0: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";
pub const CID_V1: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";
pub const IMAGE_URL: &str = "https://images.example.com/generated.png";
pub const FALLBACK_IMAGE_URL: &str = "https://images.example.com/fallback.png";
pub const GATEWAY: &str = "https://gateway.pinata.cloud";
pub const BNB_TESTNET: u64 = 97;
pub const ETHEREUM_MAINNET: u64 = 1;

pub fn account(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

/// Completion text the classifier parses into a verdict
pub fn verdict_json(risk_level: &str, reasons: &[&str]) -> String {
    serde_json::json!({
        "isRisky": risk_level != "low",
        "riskLevel": risk_level,
        "reasons": reasons,
        "suggestions": ["Consider a less specific subject"],
    })
    .to_string()
}

// ---------------------------------------------------------------------------
// Text completion
// ---------------------------------------------------------------------------

pub enum CompletionBehaviour {
    Reply(String),
    Fail(String),
    Hang,
}

pub struct MockCompletion {
    behaviour: CompletionBehaviour,
    pub calls: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletion {
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            behaviour: CompletionBehaviour::Reply(text.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn verdict(risk_level: &str, reasons: &[&str]) -> Arc<Self> {
        Self::replying(verdict_json(risk_level, reasons))
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            behaviour: CompletionBehaviour::Fail(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn hanging() -> Arc<Self> {
        Arc::new(Self {
            behaviour: CompletionBehaviour::Hang,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextCompletion for MockCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(request.clone());
        match self.behaviour {
            CompletionBehaviour::Reply(ref text) => Ok(text.clone()),
            CompletionBehaviour::Fail(ref message) => Err(CompletionError::Api {
                status: 500,
                message: message.clone(),
            }),
            CompletionBehaviour::Hang => std::future::pending().await,
        }
    }
}

// ---------------------------------------------------------------------------
// Image generation
// ---------------------------------------------------------------------------

/// Scripted per-model results; unscripted models return [`IMAGE_URL`]
#[derive(Default)]
pub struct MockImageGenerator {
    results: HashMap<String, Result<Vec<String>, ImageGenError>>,
    hanging: Vec<String>,
    pub calls: Mutex<Vec<ImageGenerationRequest>>,
}

impl MockImageGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, model: &str, result: Result<Vec<String>, ImageGenError>) -> Self {
        self.results.insert(model.to_string(), result);
        self
    }

    pub fn hanging_on(mut self, model: &str) -> Self {
        self.hanging.push(model.to_string());
        self
    }

    pub fn models_called(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.model.clone())
            .collect()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<Vec<String>, ImageGenError> {
        self.calls.lock().unwrap().push(request.clone());
        if self.hanging.contains(&request.model) {
            return std::future::pending().await;
        }
        self.results
            .get(&request.model)
            .cloned()
            .unwrap_or_else(|| Ok(vec![IMAGE_URL.to_string()]))
    }
}

pub fn invalid_request(message: &str) -> ImageGenError {
    ImageGenError::InvalidRequest {
        message: message.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Pinning
// ---------------------------------------------------------------------------

pub struct MockFetcher {
    result: Result<Vec<u8>, PinError>,
    pub urls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            result: Ok(vec![0x89, b'P', b'N', b'G']),
            urls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: PinError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(err),
            urls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ContentFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PinError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.result.clone()
    }
}

pub struct MockPinning {
    result: Result<String, PinError>,
    hang: bool,
    pub uploads: Mutex<Vec<(usize, String)>>,
}

impl MockPinning {
    pub fn returning(cid: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(cid.to_string()),
            hang: false,
            uploads: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: PinError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(err),
            hang: false,
            uploads: Mutex::new(Vec::new()),
        })
    }

    pub fn hanging() -> Arc<Self> {
        Arc::new(Self {
            result: Ok(CID_V0.to_string()),
            hang: true,
            uploads: Mutex::new(Vec::new()),
        })
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl PinningService for MockPinning {
    async fn pin_file(&self, bytes: Vec<u8>, file_name: &str) -> Result<String, PinError> {
        self.uploads
            .lock()
            .unwrap()
            .push((bytes.len(), file_name.to_string()));
        if self.hang {
            return std::future::pending().await;
        }
        self.result.clone()
    }
}

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwitchBehaviour {
    Accept,
    Reject,
    /// Fails with 4902 until the chain has been added
    UnknownChain,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AddBehaviour {
    Accept,
    Reject,
}

struct WalletState {
    accounts: Vec<Address>,
    chain_id: u64,
    reject_connect: bool,
    hang_connect: bool,
    switch: SwitchBehaviour,
    add: AddBehaviour,
    chain_added: bool,
    calls: Vec<String>,
}

pub struct MockWallet {
    state: Mutex<WalletState>,
}

impl MockWallet {
    pub fn new(accounts: Vec<Address>, chain_id: u64) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(WalletState {
                accounts,
                chain_id,
                reject_connect: false,
                hang_connect: false,
                switch: SwitchBehaviour::Accept,
                add: AddBehaviour::Accept,
                chain_added: false,
                calls: Vec::new(),
            }),
        })
    }

    pub fn on_bnb_testnet() -> Arc<Self> {
        Self::new(vec![account(0xaa)], BNB_TESTNET)
    }

    pub fn reject_connect(&self) {
        self.state.lock().unwrap().reject_connect = true;
    }

    /// Leave every later account request waiting on the user forever
    pub fn hang_connect(&self) {
        self.state.lock().unwrap().hang_connect = true;
    }

    pub fn set_switch(&self, behaviour: SwitchBehaviour) {
        self.state.lock().unwrap().switch = behaviour;
    }

    pub fn set_add(&self, behaviour: AddBehaviour) {
        self.state.lock().unwrap().add = behaviour;
    }

    pub fn set_accounts(&self, accounts: Vec<Address>) {
        self.state.lock().unwrap().accounts = accounts;
    }

    pub fn set_chain(&self, chain_id: u64) {
        self.state.lock().unwrap().chain_id = chain_id;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }
}

fn parse_chain_hex(hex: &str) -> u64 {
    u64::from_str_radix(hex.trim_start_matches("0x"), 16).unwrap()
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let (hang, result) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push("eth_requestAccounts".to_string());
            let result = if state.reject_connect {
                Err(WalletError::from_rpc(4001, "User rejected the request."))
            } else {
                Ok(state.accounts.clone())
            };
            (state.hang_connect, result)
        };
        if hang {
            std::future::pending::<()>().await;
        }
        result
    }

    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.state.lock().unwrap().accounts.clone())
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        Ok(self.state.lock().unwrap().chain_id)
    }

    async fn switch_chain(&self, chain_id_hex: &str) -> Result<(), WalletError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("wallet_switchEthereumChain:{}", chain_id_hex));
        match state.switch {
            SwitchBehaviour::Accept => {
                state.chain_id = parse_chain_hex(chain_id_hex);
                Ok(())
            }
            SwitchBehaviour::Reject => Err(WalletError::from_rpc(4001, "User rejected the request.")),
            SwitchBehaviour::UnknownChain if state.chain_added => {
                state.chain_id = parse_chain_hex(chain_id_hex);
                Ok(())
            }
            SwitchBehaviour::UnknownChain => Err(WalletError::from_rpc(
                4902,
                &format!("Unrecognized chain ID \"{}\".", chain_id_hex),
            )),
        }
    }

    async fn add_chain(&self, params: &AddChainParameters) -> Result<(), WalletError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("wallet_addEthereumChain:{}", params.chain_id));
        match state.add {
            AddBehaviour::Accept => {
                state.chain_added = true;
                Ok(())
            }
            AddBehaviour::Reject => Err(WalletError::from_rpc(4001, "User rejected the request.")),
        }
    }
}

pub async fn connected_wallet(wallet: Arc<MockWallet>) -> RwLock<WalletConnection> {
    let mut connection = WalletConnection::new(wallet, ChainConfig::bnb_testnet());
    connection.connect().await.unwrap();
    RwLock::new(connection)
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub struct MockRegistry {
    result: Result<RegistrationReceipt, RegistryError>,
    hang: bool,
    pub calls: Mutex<Vec<(Address, RegistrationRequest)>>,
}

impl MockRegistry {
    pub fn confirming() -> Arc<Self> {
        Arc::new(Self {
            result: Ok(RegistrationReceipt {
                tx_hash: "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060"
                    .to_string(),
                block_number: Some(42),
            }),
            hang: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: RegistryError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(err),
            hang: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn hanging() -> Arc<Self> {
        Arc::new(Self {
            result: Err(RegistryError::Timeout),
            hang: true,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RegistrationRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, r)| r.clone())
            .collect()
    }
}

#[async_trait]
impl ImageRegistry for MockRegistry {
    async fn register_image(
        &self,
        from: Address,
        request: &RegistrationRequest,
    ) -> Result<RegistrationReceipt, RegistryError> {
        self.calls.lock().unwrap().push((from, request.clone()));
        if self.hang {
            return std::future::pending().await;
        }
        self.result.clone()
    }
}

/// Registry contents keyed by id with their severity code
pub struct MockReader {
    entries: Vec<(String, u8)>,
}

impl MockReader {
    pub fn new(entries: &[(&str, u8)]) -> Arc<Self> {
        Arc::new(Self {
            entries: entries
                .iter()
                .map(|(id, level)| (id.to_string(), *level))
                .collect(),
        })
    }
}

#[async_trait]
impl RegistryReader for MockReader {
    async fn image_data(&self, image_id: &str) -> Result<RegisteredImage, RegistryError> {
        let (_, level) = self
            .entries
            .iter()
            .find(|(id, _)| id == image_id)
            .ok_or_else(|| RegistryError::TransactionFailed("execution reverted".to_string()))?;
        Ok(RegisteredImage {
            image_id: image_id.to_string(),
            ipfs_hash: CID_V0.to_string(),
            model_used: "dall-e-3".to_string(),
            creator: format!("{:?}", account(0xaa)),
            timestamp: "2024-06-10T06:13:20.000Z".to_string(),
            is_verified: false,
            risk_level: *level,
            risk_reasons: vec!["political persuasion".to_string()],
        })
    }

    async fn total_images(&self) -> Result<u64, RegistryError> {
        Ok(self.entries.len() as u64)
    }

    async fn registered_image(&self, index: u64) -> Result<String, RegistryError> {
        self.entries
            .get(index as usize)
            .map(|(id, _)| id.clone())
            .ok_or_else(|| RegistryError::TransactionFailed("index out of range".to_string()))
    }

    async fn high_risk_image_ids(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self
            .entries
            .iter()
            .filter(|(_, level)| *level == 2)
            .map(|(id, _)| id.clone())
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

pub struct PipelineParts {
    pub completion: Arc<MockCompletion>,
    pub images: Arc<MockImageGenerator>,
    pub fetcher: Arc<MockFetcher>,
    pub pinning: Option<Arc<MockPinning>>,
    pub registry: Option<Arc<MockRegistry>>,
    pub call_timeout: Duration,
}

impl PipelineParts {
    pub fn new(completion: Arc<MockCompletion>) -> Self {
        Self {
            completion,
            images: Arc::new(MockImageGenerator::new()),
            fetcher: MockFetcher::ok(),
            pinning: Some(MockPinning::returning(CID_V0)),
            registry: Some(MockRegistry::confirming()),
            call_timeout: Duration::from_secs(5),
        }
    }

    pub fn synthesizer(&self) -> ImageSynthesizer {
        ImageSynthesizer::new(
            self.images.clone(),
            TierSettings::dall_e_3(),
            TierSettings::dall_e_2(),
            self.call_timeout,
        )
    }

    pub fn classifier(&self) -> PromptRiskClassifier {
        PromptRiskClassifier::new(
            self.completion.clone(),
            ClassifierSettings {
                timeout: self.call_timeout,
                ..ClassifierSettings::default()
            },
        )
    }

    pub fn pinner(&self) -> ContentPinner {
        ContentPinner::new(
            self.fetcher.clone(),
            self.pinning
                .clone()
                .map(|p| p as Arc<dyn PinningService>),
            GATEWAY,
            self.call_timeout,
        )
    }

    pub fn gate(&self) -> RegistrationGate {
        RegistrationGate::new(
            self.registry
                .clone()
                .map(|r| r as Arc<dyn ImageRegistry>),
            self.call_timeout,
        )
    }

    pub fn build(&self) -> GenerationPipeline {
        GenerationPipeline::new(
            Arc::new(self.synthesizer()),
            Arc::new(self.classifier()),
            Arc::new(self.pinner()),
            Arc::new(self.gate()),
        )
    }
}

/// Services backed by the doubles in `parts`
pub fn services(
    parts: &PipelineParts,
    wallet: Option<Arc<RwLock<WalletConnection>>>,
    reader: Option<Arc<MockReader>>,
    history_path: std::path::PathBuf,
) -> zorai_node::ZoraiServices {
    zorai_node::ZoraiServices {
        config: Arc::new(zorai_node::ZoraiConfig::default()),
        completion: parts.completion.clone(),
        pipeline: Arc::new(parts.build()),
        chat_history: Arc::new(zorai_node::storage::ChatHistoryStore::new(history_path)),
        wallet,
        registry_reader: reader.map(|r| r as Arc<dyn RegistryReader>),
    }
}
