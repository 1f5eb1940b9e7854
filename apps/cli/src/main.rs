//! BadgeForge CLI — NFT metadata generation for TalkToEarn uploads.
//!
//! Converts `files.json` upload records into standardized NFT metadata
//! documents plus a run manifest, and pins them to IPFS via Pinata.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
