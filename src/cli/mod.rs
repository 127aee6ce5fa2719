//! Command-line interface for recipe-store
//!
//! Parses arguments with clap, loads layered configuration with CLI
//! overrides applied, and dispatches to a command handler.

pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment};

use crate::config::{ConfigError, ConfigLoader, Settings};

/// Loads settings, letting `--config`, `--env` and `--verbose`/`--quiet`
/// take precedence over files and environment variables.
pub fn load_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let mut loader = ConfigLoader::new()?;
    if let Some(ref path) = cli.config {
        loader = loader.with_config_file(path);
    }
    if let Some(env) = cli.env {
        loader = loader.with_environment(env.into());
    }

    let mut settings = loader.load()?;
    if let Some(level) = cli.log_level_override() {
        settings.logger.level = level.to_string();
    }
    Ok(settings)
}
