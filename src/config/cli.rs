//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// emqx-admin: manage EMQX gateways and exhooks over the admin API
///
/// Connection options can also be set in a TOML config file; explicit
/// flags win over the file.
#[derive(Debug, Parser)]
#[command(name = "emqx-admin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Broker host
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Dashboard / REST API port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Basic auth username (API key)
    #[arg(long, short = 'u', global = true)]
    pub username: Option<String>,

    /// Basic auth password (API secret)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Delay between transport retries in seconds
    #[arg(long = "retry-delay", value_name = "SECS", global = true)]
    pub retry_delay: Option<u64>,

    /// Maximum number of attempts (unbounded if not set)
    #[arg(long = "retry-max", value_name = "N", global = true)]
    pub retry_max: Option<u32>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for emqx-admin
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Manage exhook servers
    #[command(subcommand)]
    Hook(HookCommand),

    /// Manage protocol gateways
    #[command(subcommand)]
    Gateway(GatewayCommand),
}

/// `hook` subcommands.
#[derive(Debug, Subcommand)]
pub enum HookCommand {
    /// Print an exhook as JSON
    Get {
        /// Exhook name
        name: String,
    },

    /// Create an exhook from a JSON file
    Create {
        /// Path to the JSON hook record
        file: PathBuf,
    },

    /// Update an exhook from a JSON file (the name is taken from the record)
    Update {
        /// Path to the JSON hook record
        file: PathBuf,
    },
}

/// `gateway` subcommands.
#[derive(Debug, Subcommand)]
pub enum GatewayCommand {
    /// Update the exproto gateway from a JSON file
    Update {
        /// Path to the JSON exproto gateway record
        file: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
