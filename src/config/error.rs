//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or checking `dashboard.toml`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {message}")]
    Validation { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
