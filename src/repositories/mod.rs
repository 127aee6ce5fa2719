//! Repository layer for data access operations.
//!
//! Each repository owns a clone of the pool and issues one or more
//! independent statements per call. Nothing here opens a transaction; the
//! partial unique index on category names and the guarded soft delete in
//! [`CategoryRepository::delete`] keep the check-then-act paths honest.

mod category_repo;
mod recipe_repo;

pub use category_repo::CategoryRepository;
pub use recipe_repo::RecipeRepository;

use serde::Serialize;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// `AsyncDbPool` is reference counted, so cloning this is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub recipes: RecipeRepository,
    pub categories: CategoryRepository,
}

impl Repositories {
    /// Creates both repositories over the same pool.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            recipes: RecipeRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool),
        }
    }
}

/// Row counts split by soft-delete state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordCounts {
    pub active: i64,
    pub deleted: i64,
}

impl RecordCounts {
    pub fn total(&self) -> i64 {
        self.active + self.deleted
    }
}

/// Builds an `ILIKE` pattern matching `term` anywhere in a column.
///
/// `%`, `_` and `\` in the term are escaped so they match literally.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
