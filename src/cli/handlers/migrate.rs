//! Migrate command handler
//!
//! Drives the embedded migrations over a synchronous `PgConnection` on a
//! blocking thread.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;

use crate::config::DatabaseConfig;
use crate::db::{MIGRATIONS, run_pending_migrations};
use crate::error::{AppError, AppResult};

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    database: DatabaseConfig,
}

impl MigrateCommandHandler {
    pub fn new(database: DatabaseConfig) -> Self {
        Self { database }
    }

    /// Applies, lists or reverts migrations.
    ///
    /// # Arguments
    /// * `dry_run` - List pending migrations without applying them
    /// * `rollback` - Revert this many of the most recently applied migrations
    ///
    /// # Errors
    /// - `Configuration` when the database settings are invalid
    /// - `Validation` when asked to revert more migrations than are applied
    /// - `Database` when a connection or migration fails
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.database.validate()?;

        match (dry_run, rollback) {
            (true, _) => self.show_pending().await,
            (false, Some(steps)) => self.rollback(steps).await,
            (false, None) => self.apply().await,
        }
    }

    async fn show_pending(&self) -> AppResult<()> {
        let pending = self
            .blocking("check pending migrations", |conn| {
                conn.pending_migrations(MIGRATIONS)
                    .map(|pending| pending.iter().map(|m| m.name().to_string()).collect::<Vec<_>>())
            })
            .await?;

        if pending.is_empty() {
            println!("No pending migrations, database is up to date");
        } else {
            println!("{} pending migration(s):", pending.len());
            for name in &pending {
                println!("  - {}", name);
            }
            println!("\nRun without --dry-run to apply them");
        }
        Ok(())
    }

    async fn apply(&self) -> AppResult<()> {
        let applied = run_pending_migrations(&self.database.url).await?;
        tracing::info!(count = applied.len(), "Migrations applied");

        if applied.is_empty() {
            println!("No migrations to apply, database is up to date");
        } else {
            println!("Applied {} migration(s):", applied.len());
            for version in &applied {
                println!("  - {}", version);
            }
        }
        Ok(())
    }

    async fn rollback(&self, steps: u32) -> AppResult<()> {
        if steps == 0 {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: "Number of rollback steps must be greater than 0".to_string(),
            });
        }

        let applied = self
            .blocking("list applied migrations", |conn| conn.applied_migrations())
            .await?;
        if applied.len() < steps as usize {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: format!(
                    "Cannot roll back {} migration(s), only {} applied",
                    steps,
                    applied.len()
                ),
            });
        }

        let reverted = self
            .blocking("revert migrations", move |conn| {
                (0..steps)
                    .map(|_| conn.revert_last_migration(MIGRATIONS).map(|v| v.to_string()))
                    .collect::<Result<Vec<_>, _>>()
            })
            .await?;

        tracing::warn!(count = reverted.len(), "Migrations reverted");
        println!("Reverted {} migration(s):", reverted.len());
        for version in &reverted {
            println!("  - {}", version);
        }
        Ok(())
    }

    /// Runs `f` on a fresh synchronous connection inside `spawn_blocking`.
    async fn blocking<T, F>(&self, operation: &'static str, f: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(
                &mut PgConnection,
            ) -> Result<T, Box<dyn std::error::Error + Send + Sync + 'static>>
            + Send
            + 'static,
    {
        let url = self.database.url.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = PgConnection::establish(&url).map_err(|e| AppError::Database {
                operation: "establish connection for migrations".to_string(),
                source: anyhow::Error::from(e),
            })?;

            f(&mut conn).map_err(|e| AppError::Database {
                operation: operation.to_string(),
                source: anyhow::anyhow!("Migration error: {}", e),
            })
        })
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database() -> DatabaseConfig {
        DatabaseConfig {
            url: "postgres://localhost/recipes_test".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_zero_rollback_steps_rejected_before_connecting() {
        let handler = MigrateCommandHandler::new(database());

        match handler.execute(false, Some(0)).await {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "rollback_steps");
                assert!(reason.contains("greater than 0"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_database_config_rejected() {
        let handler = MigrateCommandHandler::new(DatabaseConfig::default());

        let err = handler.execute(true, None).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration { .. }));
    }
}
