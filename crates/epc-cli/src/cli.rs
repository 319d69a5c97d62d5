//! Command-line arguments.

use clap::{Parser, Subcommand};
use epc_core::AveragingPolicy;

/// Search the EPC register and compare a property with its postcode.
#[derive(Parser, Debug)]
#[command(name = "epc", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "EPC_CONFIG")]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// How rows without an efficiency score are averaged (zero-fill or skip-missing)
    #[arg(long, global = true)]
    pub averaging: Option<AveragingPolicy>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search by postcode or address
    Search {
        /// Postcode (e.g. "SW1A 1AA") or address fragment
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,

        /// Results page to show
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Show a certificate and compare it with its postcode
    Show {
        /// Unique Property Reference Number
        uprn: String,
    },

    /// Browse results interactively
    Interactive,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,

    /// Print a value by dotted key (e.g. registry.base_url)
    Get {
        /// Dotted key
        key: String,
    },

    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },

    /// Write a default config file
    Init {
        /// Where to write it instead of the default location
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
