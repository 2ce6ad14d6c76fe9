// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;
use ethers::types::Address;
use std::str::FromStr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::config::ZoraiConfig;
use crate::contracts::{
    flagged_images, high_risk_images, EthersRegistry, RegisteredImage, RegistryReader,
};
use crate::pipeline::GenerationRequest;
use crate::registration::RegistrationOutcome;
use crate::service::ZoraiServices;
use crate::wallet::connect_shared;

#[derive(Args, Debug)]
pub struct PromptArgs {
    /// Prompt text
    #[arg(long)]
    pub prompt: String,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Prompt describing the image
    #[arg(long)]
    pub prompt: String,

    /// Identifier to register the image under
    #[arg(long)]
    pub image_id: Option<String>,
}

/// Registry location; defaults come from the environment
#[derive(Args, Debug, Default)]
pub struct ReadArgs {
    /// Registry contract address
    #[arg(long, env = "CONTRACT_ADDRESS")]
    pub contract: Option<String>,

    /// Read-only RPC endpoint
    #[arg(long, env = "PUBLIC_RPC_URL")]
    pub rpc_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Image identifier
    pub id: String,

    #[command(flatten)]
    pub read: ReadArgs,
}

/// Contract address and RPC endpoint for read commands, flags over config
pub fn resolve_read_target(args: &ReadArgs, config: &ZoraiConfig) -> Result<(Address, String)> {
    let address = match args.contract {
        Some(ref raw) => {
            Address::from_str(raw).map_err(|e| anyhow!("Invalid contract address {}: {}", raw, e))?
        }
        None => config
            .contract_address
            .ok_or_else(|| anyhow!("Contract address required. Use --contract or set CONTRACT_ADDRESS"))?,
    };
    let rpc_url = args
        .rpc_url
        .clone()
        .unwrap_or_else(|| config.chain.public_rpc_url.clone());
    Ok((address, rpc_url))
}

fn reader(args: &ReadArgs) -> Result<Arc<dyn RegistryReader>> {
    let config = ZoraiConfig::from_env();
    let (address, rpc_url) = resolve_read_target(args, &config)?;
    Ok(Arc::new(EthersRegistry::new(address, &rpc_url, None)?))
}

fn print_image(image: &RegisteredImage) {
    println!("🖼  {}", image.image_id);
    println!("  IPFS hash:   {}", image.ipfs_hash);
    println!("  Model:       {}", image.model_used);
    println!("  Creator:     {}", image.creator);
    println!("  Registered:  {}", image.timestamp);
    println!("  Risk level:  {}", image.risk_level);
    println!("  Verified:    {}", image.is_verified);
    for reason in &image.risk_reasons {
        println!("    - {}", reason);
    }
}

fn print_images(images: &[RegisteredImage]) {
    if images.is_empty() {
        println!("No images found");
        return;
    }
    for image in images {
        print_image(image);
        println!();
    }
}

pub async fn analyze(args: PromptArgs) -> Result<()> {
    let services = ZoraiServices::from_config(ZoraiConfig::from_env())?;
    let verdict = services.pipeline.classifier().classify(&args.prompt).await?;
    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(())
}

pub async fn generate(args: GenerateArgs) -> Result<()> {
    let services = ZoraiServices::from_config(ZoraiConfig::from_env())?;

    if let Some(ref wallet) = services.wallet {
        if let Err(e) = connect_shared(wallet).await {
            warn!("Wallet not connected, flagged images will not be registered: {}", e);
        }
    }

    let request = GenerationRequest {
        prompt: args.prompt,
        image_id: args.image_id,
    };
    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    let result = services
        .pipeline
        .run(&request, services.wallet.as_deref(), &cancel)
        .await?;

    println!("✅ Image generated with {}", result.image.model_used);
    println!("  URL:        {}", result.image.image_url);
    println!("  Risk level: {}", result.image.risk_level);
    if let Some(ref cid) = result.image.ipfs_hash {
        println!("  IPFS hash:  {}", cid);
    }
    match result.registration {
        RegistrationOutcome::Registered { ref tx_hash, .. } => {
            println!("  Registered: {}", services.config.chain.tx_url(tx_hash));
        }
        ref other => println!("  Registration: {}", serde_json::to_string(other)?),
    }
    for warning in &result.warnings {
        println!("⚠️  {}", warning);
    }
    Ok(())
}

pub async fn image(args: ImageArgs) -> Result<()> {
    let image = reader(&args.read)?.image_data(&args.id).await?;
    print_image(&image);
    Ok(())
}

pub async fn flagged(args: ReadArgs) -> Result<()> {
    let images = flagged_images(reader(&args)?.as_ref()).await?;
    print_images(&images);
    Ok(())
}

pub async fn high_risk(args: ReadArgs) -> Result<()> {
    let images = high_risk_images(reader(&args)?.as_ref()).await?;
    print_images(&images);
    Ok(())
}

pub async fn total(args: ReadArgs) -> Result<()> {
    let total = reader(&args)?.total_images().await?;
    println!("{}", total);
    Ok(())
}

pub fn network() -> Result<()> {
    let config = ZoraiConfig::from_env();
    println!("🔗 {} ({})", config.chain.name, config.chain.chain_id_hex());
    println!(
        "{}",
        serde_json::to_string_pretty(&config.chain.add_chain_parameters())?
    );
    Ok(())
}
