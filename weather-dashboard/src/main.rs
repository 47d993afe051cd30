//! Binary crate for the `weather-dashboard` terminal dashboard.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive input selection (marker, metric, range)
//! - Rendering the two chart panels in the terminal

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod interactive;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    info!(version = env!("CARGO_PKG_VERSION"), command = ?cmd.command, "starting weather-dashboard");
    cmd.run().await
}
