//! Command executor for dispatching CLI commands

use super::handlers::{MigrateCommandHandler, SeedCommandHandler, StatsCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::AppResult;

/// Runs the parsed command with fully loaded settings
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    tracing::debug!(command = ?cli.command, "Executing command");

    match cli.command {
        Commands::Migrate { dry_run, rollback } => {
            MigrateCommandHandler::new(settings.database)
                .execute(dry_run, rollback)
                .await
        }
        Commands::Seed => SeedCommandHandler::new(settings).execute().await,
        Commands::Stats => StatsCommandHandler::new(settings).execute().await,
    }
}
