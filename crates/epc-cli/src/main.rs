//! EPC CLI
//!
//! Searches the Energy Performance Certificate register by postcode or
//! address, shows a certificate, and compares it with the average of
//! properties sharing its postcode.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config_handlers;
mod repl;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for results and JSON
    let default_filter = if cli.verbose { "info,epc=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    commands::run(cli).await
}
