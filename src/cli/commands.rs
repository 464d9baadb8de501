//! CLI command implementations.
//!
//! `serve` wires the in-memory repository, call log and REST facade
//! together and blocks on the tokio runtime; `check-config` validates a
//! configuration file without starting anything.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::observability::{CallLog, FileCallLog, Logger, MemoryCallLog};
use crate::repository::InMemoryRepository;
use crate::rest::{CatalogServer, RestServerConfig};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Load the REST configuration; a missing file yields the defaults
pub fn load_config(path: &Path) -> CliResult<RestServerConfig> {
    if !path.exists() {
        return Ok(RestServerConfig::default());
    }
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::config_error(format!("failed to read {}: {e}", path.display())))?;
    let config: RestServerConfig = serde_json::from_str(&content)
        .map_err(|e| CliError::config_error(format!("failed to parse {}: {e}", path.display())))?;
    Ok(config)
}

/// Run a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            config,
            port,
            call_log,
        } => serve(&config, port, call_log),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Start the REST facade and block until it stops
pub fn serve(config_path: &Path, port: Option<u16>, call_log: Option<PathBuf>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(call_log) = call_log {
        config.call_log_path = Some(call_log);
    }

    let call_log: Arc<dyn CallLog> = match &config.call_log_path {
        Some(path) => Arc::new(FileCallLog::open(path)?),
        None => Arc::new(MemoryCallLog::new()),
    };
    let repository = Arc::new(InMemoryRepository::new());

    Logger::info("SERVE", &[("addr", config.socket_addr().as_str())]);
    let server = CatalogServer::new(config, repository, call_log);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::ServeFailed(format!("runtime startup failed: {e}")))?;
    runtime
        .block_on(server.start())
        .map_err(|e| CliError::ServeFailed(e.to_string()))
}

/// Validate a configuration file and print the effective settings
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let rendered = serde_json::to_string_pretty(&config)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.port, 9443);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalogd.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{"port": 8080, "host": "127.0.0.1"}}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_malformed_config_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalogd.json");
        fs::write(&path, "not json").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("CATALOGD_CLI_CONFIG_ERROR"));
    }
}
