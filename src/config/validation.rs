//! Configuration validation logic
//!
//! Range and format checks run after all layers are merged, so an invalid
//! value fails at startup instead of at the first query.

use crate::config::error::ConfigError;
use crate::config::settings::{DatabaseConfig, ListingSettings, LoggerSettings, Settings};

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must be a non-empty `postgres://` or `postgresql://` URL
    /// - Max and min connections must be greater than 0, with min <= max
    /// - Connection timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Set database.url or RECIPE_STORE_DATABASE__URL.",
            ));
        }

        if !self.is_postgres_url() {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }

    fn is_postgres_url(&self) -> bool {
        ["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }
}

impl ListingSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_limit < 1 {
            return Err(ConfigError::validation(
                "listing.max_limit",
                "Max limit must be at least 1.",
            ));
        }

        for (field, value) in [
            ("listing.recipe_default_limit", self.recipe_default_limit),
            ("listing.category_default_limit", self.category_default_limit),
        ] {
            if value < 1 || value > self.max_limit {
                return Err(ConfigError::validation(
                    field,
                    format!(
                        "Default limit {} must be between 1 and listing.max_limit ({}).",
                        value, self.max_limit
                    ),
                ));
            }
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file.enabled && self.file.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.file.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.file.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        self.clone().into_logger_config().map(|_| ())
    }
}

impl Settings {
    /// Validate all configuration settings, returning the first failure
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.listing.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
