//! Service layer for business logic operations.
//!
//! Services validate input and enforce the soft-delete rules, then delegate
//! to the repositories.

mod category_service;
mod recipe_service;

pub use category_service::CategoryService;
pub use recipe_service::RecipeService;

use crate::models::ListingConfig;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since the underlying pool is reference counted.
#[derive(Clone)]
pub struct Services {
    pub recipes: RecipeService,
    pub categories: CategoryService,
}

impl Services {
    /// Creates the services from the repositories and listing defaults.
    pub fn new(repos: Repositories, listing: ListingConfig) -> Self {
        Self {
            recipes: RecipeService::new(repos.recipes, repos.categories.clone(), listing),
            categories: CategoryService::new(repos.categories, listing),
        }
    }
}
