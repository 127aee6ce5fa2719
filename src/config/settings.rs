//! Configuration settings structures for recipe-store
//!
//! Everything here can be loaded from TOML files and environment variables.
//! Every field has a default so partial files deserialize cleanly.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
use crate::models::ListingConfig;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "recipe-store".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_recipe_limit() -> i64 {
    10
}

fn default_category_limit() -> i64 {
    50
}

fn default_max_limit() -> i64 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/recipe-store.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// PostgreSQL connection pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of idle connections kept open
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Seconds a caller waits for a free connection before failing
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Whether to run pending migrations when the pool is created
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

// ============================================================================
// Listing Configuration
// ============================================================================

/// Page sizes used when a list request leaves `limit` out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSettings {
    #[serde(default = "default_recipe_limit")]
    pub recipe_default_limit: i64,

    #[serde(default = "default_category_limit")]
    pub category_default_limit: i64,

    #[serde(default = "default_max_limit")]
    pub max_limit: i64,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            recipe_default_limit: default_recipe_limit(),
            category_default_limit: default_category_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl ListingSettings {
    pub fn to_listing_config(&self) -> ListingConfig {
        ListingConfig {
            recipe_limit: self.recipe_default_limit,
            category_limit: self.category_default_limit,
            max_limit: self.max_limit,
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level or filter directive
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert the file representation into the runtime `LoggerConfig`
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger", e.to_string()))
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format)
            .map_err(|e| ConfigError::validation("logger.file", e.to_string()))
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub listing: ListingSettings,

    #[serde(default)]
    pub logger: LoggerSettings,
}
