// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// ZorAi CLI
#[derive(Parser, Debug)]
#[command(name = "zorai-cli")]
#[command(version = "1.0.0")]
#[command(about = "Generate, classify and look up registered AI images", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a prompt without generating an image
    Analyze(commands::PromptArgs),

    /// Generate an image and register it on chain when flagged
    Generate(commands::GenerateArgs),

    /// Show the registry record for one image
    Image(commands::ImageArgs),

    /// List medium and high risk images from the registry
    Flagged(commands::ReadArgs),

    /// List images the registry marks as high risk
    HighRisk(commands::ReadArgs),

    /// Count registered images
    Total(commands::ReadArgs),

    /// Print the supported network parameters
    Network,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    dotenv::dotenv().ok();
    match cli.command {
        Commands::Analyze(args) => commands::analyze(args).await,
        Commands::Generate(args) => commands::generate(args).await,
        Commands::Image(args) => commands::image(args).await,
        Commands::Flagged(args) => commands::flagged(args).await,
        Commands::HighRisk(args) => commands::high_risk(args).await,
        Commands::Total(args) => commands::total(args).await,
        Commands::Network => commands::network(),
    }
}
