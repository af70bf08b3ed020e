//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

/// Store listing image generator and social publisher.
///
/// One invocation performs exactly one fetch-compose-publish cycle.
#[derive(Parser, Debug)]
#[command(name = "storefront", version, about)]
pub struct Cli {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Output image path (overrides the config value).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Load a recorded snapshot file instead of fetching the live catalog.
    #[arg(long, conflicts_with = "record_snapshot")]
    pub snapshot: Option<PathBuf>,

    /// Write the fetched snapshot to a file for later replay.
    #[arg(long)]
    pub record_snapshot: Option<PathBuf>,

    /// Compose and save the image without publishing anywhere.
    #[arg(long)]
    pub no_publish: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
