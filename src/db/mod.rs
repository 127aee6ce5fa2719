//! Database access: async connection pooling, embedded migrations and seed data.

mod pool;
pub mod seed;

pub use pool::{
    AsyncDbPool, DbConnection, MIGRATIONS, establish_async_connection_pool, get_connection,
    run_pending_migrations,
};
