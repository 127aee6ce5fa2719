//! Configuration loader for recipe-store
//!
//! `ConfigLoader` merges configuration from files and environment variables
//! with a fixed precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "RECIPE_STORE_CONFIG_DIR";

/// Environment variable for a single configuration file
const CONFIG_FILE_ENV: &str = "RECIPE_STORE_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "RECIPE_STORE";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources, lowest priority first:
/// 1. `default.toml` (required)
/// 2. `{environment}.toml` (optional)
/// 3. `local.toml` (optional)
/// 4. `RECIPE_STORE_*` environment variables
///
/// When a single configuration file is selected, it replaces layers 1-3.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `RECIPE_STORE_CONFIG_DIR`, `RECIPE_STORE_CONFIG_FILE`
    /// and `RECIPE_STORE_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns `MutualExclusivityError` if both the directory and the file
    /// variables are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && config_dir_var.is_some() {
            return Err(ConfigError::mutual_exclusivity(format!(
                "{} and {} cannot both be set. Use {} for layered configuration or {} for a single configuration file.",
                CONFIG_DIR_ENV, CONFIG_FILE_ENV, CONFIG_DIR_ENV, CONFIG_FILE_ENV
            )));
        }

        Ok(Self {
            config_dir: config_dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Load exactly this file instead of the layered directory
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load, deserialize and validate configuration from all sources
    ///
    /// # Errors
    ///
    /// - `FileNotFound` when `default.toml` (or the selected file) is missing
    /// - `ParseError` when the merged configuration does not deserialize
    /// - `ValidationError` when a value is out of range
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        // Environment variables always win: RECIPE_STORE_DATABASE__URL -> database.url
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = Self::add_file_source(builder, &self.config_dir.join("default.toml"), true)?;

        let env_path = self.config_dir.join(self.environment.layer_file());
        let builder = Self::add_file_source(builder, &env_path, false)?;

        Self::add_file_source(builder, &self.config_dir.join("local.toml"), false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        let path = path.to_str().ok_or_else(|| {
            ConfigError::validation("config_file", format!("Path is not valid UTF-8: {}", path.display()))
        })?;

        Ok(builder.add_source(File::new(path, FileFormat::Toml).required(required)))
    }
}
