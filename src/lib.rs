//! recipe-store
//!
//! Data access for recipes and categories on PostgreSQL: filtered, sorted
//! and paginated listing, partial updates, soft delete with restore, and a
//! delete guard for categories that still have active recipes.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod services;
pub mod state;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}
