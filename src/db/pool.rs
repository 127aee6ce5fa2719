//! Async database connection pool implementation.
//!
//! Uses the bb8 pool manager from diesel_async for PostgreSQL connections.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_migrations::{EmbeddedMigrations, embed_migrations};

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Migrations compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Async connection pool type alias.
///
/// bb8::Pool is reference counted internally, so cloning it is cheap and
/// repositories can each hold their own handle.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// A connection checked out of [`AsyncDbPool`].
pub type DbConnection<'a> = PooledConnection<'a, AsyncPgConnection>;

/// Creates an async database connection pool.
///
/// Callers beyond `max_connections` wait up to `connection_timeout` seconds
/// for a free connection before the checkout fails.
///
/// # Errors
///
/// - `AppError::Configuration` - If the database configuration is invalid
/// - `AppError::ConnectionPool` - If the pool cannot open its initial connections
pub async fn establish_async_connection_pool(config: &DatabaseConfig) -> AppResult<AsyncDbPool> {
    config.validate()?;

    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.url.as_str());
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool established"
    );

    Ok(pool)
}

/// Checks a connection out of the pool.
pub async fn get_connection(pool: &AsyncDbPool) -> AppResult<DbConnection<'_>> {
    pool.get().await.map_err(|e| AppError::ConnectionPool {
        source: anyhow::Error::from(e),
    })
}

/// Applies every pending embedded migration and returns the applied versions.
///
/// Migrations run on a blocking thread over a synchronous `PgConnection`.
pub async fn run_pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    let database_url = database_url.to_string();

    tokio::task::spawn_blocking(move || {
        use diesel::Connection;
        use diesel::pg::PgConnection;
        use diesel_migrations::MigrationHarness;

        let mut conn = PgConnection::establish(&database_url).map_err(|e| AppError::Database {
            operation: "establish connection for migrations".to_string(),
            source: anyhow::Error::from(e),
        })?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::Database {
                operation: "run pending migrations".to_string(),
                source: anyhow::anyhow!("Migration error: {}", e),
            })?;

        Ok::<_, AppError>(applied.iter().map(|m| m.to_string()).collect())
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?
}
