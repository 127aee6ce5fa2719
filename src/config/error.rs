//! Configuration error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Validation error with field and message
    #[error("Validation error: {field} - {message}")]
    ValidationError { field: String, message: String },

    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    #[error("Mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    /// Generic configuration error from config crate
    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }

    /// The configuration key this error is about, when known.
    pub fn key(&self) -> &str {
        match self {
            ConfigError::ValidationError { field, .. } => field,
            ConfigError::FileNotFound(_) => "config_file",
            ConfigError::EnvVarError(_) | ConfigError::MutualExclusivityError(_) => "environment",
            ConfigError::ParseError(_) | ConfigError::Other(_) => "config",
        }
    }
}

impl From<ConfigError> for crate::error::AppError {
    fn from(error: ConfigError) -> Self {
        crate::error::AppError::Configuration {
            key: error.key().to_string(),
            source: anyhow::Error::from(error),
        }
    }
}
