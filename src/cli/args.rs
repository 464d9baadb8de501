//! CLI argument definitions using clap
//!
//! Commands:
//! - catalogd serve --config <path> [--port <port>] [--call-log <path>]
//! - catalogd check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// catalogd - metadata catalog access service with a REST facade
#[derive(Parser, Debug)]
#[command(name = "catalogd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the REST facade
    Serve {
        /// Path to configuration file; missing file means defaults
        #[arg(long, default_value = "./catalogd.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,

        /// Override the configured call-log file
        #[arg(long)]
        call_log: Option<PathBuf>,
    },

    /// Validate the configuration file and print the effective settings
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./catalogd.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
