//! Binary crate for the `weather-history` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup for the `--quiet` / `--debug` flags
//! - Interactive configuration

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cmd.log_level())
        .with_target(false)
        .without_time()
        .init();

    cmd.run().await
}
