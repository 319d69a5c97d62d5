//! Search, show and interactive commands.

use std::fmt::Display;
use std::io;

use anyhow::Result;
use epc_client::EpcClient;
use epc_core::{AveragingPolicy, EpcConfig};
use epc_session::SearchSession;
use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::config_handlers;
use crate::repl;

/// Dispatches a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let Cli {
        config,
        json,
        averaging,
        command,
        ..
    } = cli;
    let config_path = config.as_deref();

    match command {
        Command::Config { action } => {
            config_handlers::handle_config_command(config_path, action)?;
        }
        Command::Search { term, page } => {
            let mut session = open_session(config_path, averaging)?;
            session.set_page(page);
            let panel = session.submit(&term.join(" ")).await?;
            emit(panel, json)?;
        }
        Command::Show { uprn } => {
            let mut session = open_session(config_path, averaging)?;
            let selection = session.show_uprn(&uprn).await?;
            emit(&selection, json)?;
        }
        Command::Interactive => {
            let mut session = open_session(config_path, averaging)?;
            let stdin = io::stdin();
            repl::run(
                &mut session,
                stdin.lock(),
                &mut io::stdout(),
                &mut io::stderr(),
            )
            .await?;
        }
    }
    Ok(())
}

/// Loads config and builds a session over the HTTP client.
///
/// `averaging` overrides the policy from the config file.
pub fn open_session(
    config_path: Option<&str>,
    averaging: Option<AveragingPolicy>,
) -> Result<SearchSession<EpcClient>> {
    let config = EpcConfig::load(config_path)?;
    let client = EpcClient::from_config(&config.registry)?;
    let policy = averaging.unwrap_or(config.analysis.averaging);
    tracing::debug!(url = %client.search_url(), %policy, "Opening session");
    Ok(SearchSession::new(client).with_averaging(policy))
}

/// Prints `value` as text, or as pretty JSON when `json` is set.
pub fn emit<T: Serialize + Display>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{value}");
    }
    Ok(())
}
