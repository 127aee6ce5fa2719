//! CLI argument parsing with clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Maintenance commands for the recipe store database
#[derive(Parser, Debug)]
#[command(name = "recipe-store")]
#[command(about = "Maintenance commands for the recipe store database")]
#[command(long_about = "
recipe-store manages the PostgreSQL database behind the recipe and category
stores: it applies the embedded schema migrations, loads sample data and
reports row counts.

EXAMPLES:
    # Apply pending migrations
    recipe-store migrate

    # List pending migrations without applying them
    recipe-store migrate --dry-run

    # Revert the last migration
    recipe-store migrate --rollback 1

    # Load sample categories and recipes into the test database
    recipe-store --env test seed

    # Show active and deleted row counts
    recipe-store --config /etc/recipe-store/production.toml stats
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Load exactly this TOML file instead of the layered `config/` directory
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Environment whose `{env}.toml` layer is loaded
    ///
    /// Overrides RECIPE_STORE_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Apply, preview or revert the embedded schema migrations
    ///
    /// Examples:
    ///   recipe-store migrate                 # Apply all pending migrations
    ///   recipe-store migrate --dry-run       # Show pending migrations
    ///   recipe-store migrate --rollback 2    # Revert the last 2 migrations
    Migrate {
        /// List pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of most recent migrations to revert (1-100)
        #[arg(long, value_name = "STEPS", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
    /// Insert sample categories and recipes
    ///
    /// Categories are matched by name; recipes are only added to an empty table.
    Seed,
    /// Print active and soft-deleted row counts
    Stats,
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

impl Cli {
    /// Log level forced by `--verbose` or `--quiet`, if either is set
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}
