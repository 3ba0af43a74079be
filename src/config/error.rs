//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    /// Required setting absent from file and environment
    #[error("missing required setting '{field}' (set {env_var} or [{field}] in the config file)")]
    MissingField { field: String, env_var: String },
}
