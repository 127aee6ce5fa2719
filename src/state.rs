//! Shared application state.
//!
//! Bundles the pool, the repositories built on it and the services built on
//! those, for commands and embedding callers.

use crate::config::Settings;
use crate::db::{AsyncDbPool, establish_async_connection_pool, run_pending_migrations};
use crate::error::AppResult;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since everything inside shares the same pool.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub repositories: Repositories,
    pub db_pool: AsyncDbPool,
    pub settings: Settings,
}

impl AppState {
    /// Builds the state over an existing pool.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    /// * `settings` - Loaded settings; `listing` supplies page size defaults
    pub fn new(pool: AsyncDbPool, settings: Settings) -> Self {
        let repositories = Repositories::new(pool.clone());
        let services = Services::new(repositories.clone(), settings.listing.to_listing_config());
        Self {
            services,
            repositories,
            db_pool: pool,
            settings,
        }
    }

    /// Opens the pool described by `settings.database` and builds the state.
    ///
    /// Pending migrations run first when `database.auto_migrate` is set.
    pub async fn connect(settings: Settings) -> AppResult<Self> {
        if settings.database.auto_migrate {
            let applied = run_pending_migrations(&settings.database.url).await?;
            if !applied.is_empty() {
                tracing::info!(count = applied.len(), "Applied pending migrations");
            }
        }

        let pool = establish_async_connection_pool(&settings.database).await?;
        Ok(Self::new(pool, settings))
    }
}
