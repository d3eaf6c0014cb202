//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::validate_config;
use crate::routing::PatternError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<PatternError>),
}

fn join_errors(errors: &[PatternError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config<T: DeserializeOwned>(content: &str) -> Result<RouterConfig<T>, ConfigError> {
    let config: RouterConfig<T> = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<RouterConfig<T>, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}
