//! CLI-specific error types; all CLI errors are fatal.

use std::io;

use thiserror::Error;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced by the command line front end
#[derive(Debug, Error)]
pub enum CliError {
    #[error("CATALOGD_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    #[error("CATALOGD_CLI_IO_ERROR: {0}")]
    Io(String),

    #[error("CATALOGD_CLI_SERVE_FAILED: {0}")]
    ServeFailed(String),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Config(format!("JSON error: {e}"))
    }
}
