use std::io;

use thiserror::Error;

/// Result type used across the hookscope crates.
pub type Result<T> = std::result::Result<T, HookscopeError>;

/// Canonical error representation shared by the service and the CLI.
#[derive(Debug, Error)]
pub enum HookscopeError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("deserialization error: {0}")]
    DeserializationError(String),

    #[error("invalid filter criteria: {0}")]
    InvalidCriteria(String),

    #[error("webhook log not found: {0}")]
    LogNotFound(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("general error: {0}")]
    GeneralError(String),
}

impl From<serde_json::Error> for HookscopeError {
    fn from(err: serde_json::Error) -> Self {
        HookscopeError::DeserializationError(err.to_string())
    }
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {key}: {value}")]
    InvalidValue { key: String, value: String },
}

impl From<ConfigError> for HookscopeError {
    fn from(value: ConfigError) -> Self {
        HookscopeError::ConfigError(value.to_string())
    }
}
