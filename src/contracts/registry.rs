// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image registry access: wallet-signed writes, public-RPC reads

use async_trait::async_trait;
use ethers::prelude::*;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info};

use super::errors::RegistryError;
use super::types::{RegisteredImage, RegistrationReceipt, RegistrationRequest, ZorAiRegistry};
use crate::safety::RiskLevel;

/// Chain-bound write side of the registry
#[async_trait]
pub trait ImageRegistry: Send + Sync {
    /// Submit `registerImage` signed by `from` and wait for one confirmation
    async fn register_image(
        &self,
        from: Address,
        request: &RegistrationRequest,
    ) -> Result<RegistrationReceipt, RegistryError>;
}

/// Read side of the registry; never depends on wallet state
#[async_trait]
pub trait RegistryReader: Send + Sync {
    async fn image_data(&self, image_id: &str) -> Result<RegisteredImage, RegistryError>;

    async fn total_images(&self) -> Result<u64, RegistryError>;

    async fn registered_image(&self, index: u64) -> Result<String, RegistryError>;

    async fn high_risk_image_ids(&self) -> Result<Vec<String>, RegistryError>;
}

/// Resolve every id the contract lists as high risk
pub async fn high_risk_images(
    reader: &dyn RegistryReader,
) -> Result<Vec<RegisteredImage>, RegistryError> {
    let ids = reader.high_risk_image_ids().await?;
    try_join_all(ids.iter().map(|id| reader.image_data(id))).await
}

/// Upper bound on `totalImages` accepted by [`flagged_images`]
pub const MAX_SCANNED_IMAGES: u64 = 10_000;

/// Walk the full registry and keep medium and high risk entries
pub async fn flagged_images(
    reader: &dyn RegistryReader,
) -> Result<Vec<RegisteredImage>, RegistryError> {
    let total = reader.total_images().await?;
    if total > MAX_SCANNED_IMAGES {
        return Err(RegistryError::Decode(format!(
            "totalImages {} exceeds scan limit of {}",
            total, MAX_SCANNED_IMAGES
        )));
    }
    let mut ids = Vec::new();
    for index in 0..total {
        ids.push(reader.registered_image(index).await?);
    }
    let images = try_join_all(ids.iter().map(|id| reader.image_data(id))).await?;
    Ok(images
        .into_iter()
        .filter(|image| {
            RiskLevel::from_severity_code(image.risk_level)
                .map(|level| level.requires_registration())
                .unwrap_or(false)
        })
        .collect())
}

pub struct EthersRegistry {
    address: Address,
    reader: ZorAiRegistry<Provider<Http>>,
    writer: Option<ZorAiRegistry<Provider<Http>>>,
}

impl EthersRegistry {
    /// `wallet_rpc_url` is the signing bridge; without it the registry is read-only
    pub fn new(
        address: Address,
        public_rpc_url: &str,
        wallet_rpc_url: Option<&str>,
    ) -> Result<Self, RegistryError> {
        let public = Provider::<Http>::try_from(public_rpc_url)
            .map_err(|e| RegistryError::Connectivity(format!("invalid RPC URL: {}", e)))?;
        let reader = ZorAiRegistry::new(address, Arc::new(public));

        let writer = match wallet_rpc_url {
            Some(url) => {
                let wallet = Provider::<Http>::try_from(url).map_err(|e| {
                    RegistryError::Connectivity(format!("invalid wallet URL: {}", e))
                })?;
                Some(ZorAiRegistry::new(address, Arc::new(wallet)))
            }
            None => None,
        };

        Ok(Self {
            address,
            reader,
            writer,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl ImageRegistry for EthersRegistry {
    async fn register_image(
        &self,
        from: Address,
        request: &RegistrationRequest,
    ) -> Result<RegistrationReceipt, RegistryError> {
        let contract = self.writer.as_ref().ok_or(RegistryError::NotConfigured)?;

        let call = contract
            .register_image(
                request.image_id.clone(),
                request.model_used.clone(),
                request.ipfs_hash.clone(),
                request.severity,
                request.reasons.clone(),
            )
            .from(from);

        let pending = call
            .send()
            .await
            .map_err(RegistryError::from_contract_error)?;
        let tx_hash = pending.tx_hash();
        info!(tx_hash = ?tx_hash, image_id = %request.image_id, "Registration submitted");

        let receipt = pending
            .confirmations(1)
            .await
            .map_err(RegistryError::from_provider_error)?
            .ok_or_else(|| {
                RegistryError::TransactionFailed("transaction dropped from mempool".to_string())
            })?;

        if receipt.status != Some(U64::from(1)) {
            return Err(RegistryError::TransactionFailed(format!(
                "transaction {:?} reverted",
                tx_hash
            )));
        }

        Ok(RegistrationReceipt {
            tx_hash: format!("{:?}", tx_hash),
            block_number: receipt.block_number.map(|b| b.as_u64()),
        })
    }
}

#[async_trait]
impl RegistryReader for EthersRegistry {
    async fn image_data(&self, image_id: &str) -> Result<RegisteredImage, RegistryError> {
        debug!(image_id, "Reading image data");
        let data = self
            .reader
            .get_image_data(image_id.to_string())
            .call()
            .await
            .map_err(RegistryError::from_contract_error)?;
        Ok(RegisteredImage::from_contract(image_id, data))
    }

    async fn total_images(&self) -> Result<u64, RegistryError> {
        let total = self
            .reader
            .get_total_images()
            .call()
            .await
            .map_err(RegistryError::from_contract_error)?;
        Ok(total.low_u64())
    }

    async fn registered_image(&self, index: u64) -> Result<String, RegistryError> {
        self.reader
            .registered_images(U256::from(index))
            .call()
            .await
            .map_err(RegistryError::from_contract_error)
    }

    async fn high_risk_image_ids(&self) -> Result<Vec<String>, RegistryError> {
        self.reader
            .get_high_risk_images()
            .call()
            .await
            .map_err(RegistryError::from_contract_error)
    }
}
