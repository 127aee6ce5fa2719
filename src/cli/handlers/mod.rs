//! Command handlers for CLI operations
//!
//! Each handler owns the settings it needs and prints a short report.

pub mod migrate;
pub mod seed;
pub mod stats;

pub use migrate::MigrateCommandHandler;
pub use seed::SeedCommandHandler;
pub use stats::StatsCommandHandler;
