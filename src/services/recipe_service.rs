//! Recipe service for business logic operations.
//!
//! Validates input, turns missing rows into `NotFound`, and enforces the
//! soft-delete state machine before calling into [`RecipeRepository`].

use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{
    ListingConfig, NewRecipe, RecipeListOptions, RecipePage, RecipeWithCategory, UpdateRecipe,
};
use crate::repositories::{CategoryRepository, RecipeRepository, RecordCounts};

/// Recipe service wrapping the recipe repository.
///
/// Holds the category repository as well, to check that an assigned
/// category exists.
#[derive(Clone)]
pub struct RecipeService {
    repo: RecipeRepository,
    categories: CategoryRepository,
    listing: ListingConfig,
}

impl RecipeService {
    pub fn new(
        repo: RecipeRepository,
        categories: CategoryRepository,
        listing: ListingConfig,
    ) -> Self {
        Self {
            repo,
            categories,
            listing,
        }
    }

    /// Lists recipes after validating and resolving the raw options.
    ///
    /// # Arguments
    /// * `options` - Filters, sort and page window as received
    ///
    /// # Returns
    /// The requested page with pagination
    pub async fn list(&self, options: RecipeListOptions) -> AppResult<RecipePage> {
        options.validate()?;
        let query = options.resolve(&self.listing);
        self.repo.list(&query).await
    }

    /// Gets a recipe by id, or `NotFound`.
    ///
    /// # Arguments
    /// * `id` - The recipe's ID
    /// * `include_deleted` - Whether a soft-deleted recipe may be returned
    pub async fn get(&self, id: i32, include_deleted: bool) -> AppResult<RecipeWithCategory> {
        self.repo
            .find_by_id(id, include_deleted)
            .await?
            .ok_or_else(|| AppError::not_found("recipe", id))
    }

    /// Creates a recipe.
    ///
    /// # Errors
    /// - `ValidationErrors` when a field is out of range
    /// - `Validation` on `category_id` when the category does not exist
    pub async fn create(&self, new_recipe: NewRecipe) -> AppResult<RecipeWithCategory> {
        new_recipe.validate()?;
        self.ensure_category(new_recipe.category_id).await?;

        let created = self.repo.create(new_recipe).await?;
        tracing::info!(recipe_id = created.recipe.id, "Recipe created");
        Ok(created)
    }

    /// Applies a partial update to an active recipe.
    ///
    /// An update without fields returns the recipe unchanged.
    pub async fn update(&self, id: i32, changes: UpdateRecipe) -> AppResult<RecipeWithCategory> {
        changes.validate()?;
        self.get(id, false).await?;
        self.ensure_category(changes.assigned_category()).await?;

        let touched = !changes.is_empty();
        let updated = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("recipe", id))?;

        if touched {
            tracing::info!(recipe_id = id, "Recipe updated");
        }
        Ok(updated)
    }

    /// Soft-deletes an active recipe.
    ///
    /// # Errors
    /// `NotFound` when the recipe is missing or already deleted
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("recipe", id));
        }
        tracing::info!(recipe_id = id, "Recipe soft-deleted");
        Ok(())
    }

    /// Restores a soft-deleted recipe.
    ///
    /// # Errors
    /// - `NotFound` when no recipe has this id
    /// - `Conflict` when the recipe is not deleted
    pub async fn restore(&self, id: i32) -> AppResult<RecipeWithCategory> {
        let current = self.get(id, true).await?;
        if !current.recipe.is_deleted() {
            return Err(AppError::conflict(format!("Recipe {} is not deleted", id)));
        }

        let restored = self
            .repo
            .restore(id)
            .await?
            .ok_or_else(|| AppError::not_found("recipe", id))?;
        tracing::info!(recipe_id = id, "Recipe restored");
        Ok(restored)
    }

    /// Permanently removes a recipe, active or soft-deleted.
    pub async fn hard_delete(&self, id: i32) -> AppResult<()> {
        if !self.repo.hard_delete(id).await? {
            return Err(AppError::not_found("recipe", id));
        }
        tracing::warn!(recipe_id = id, "Recipe permanently deleted");
        Ok(())
    }

    pub async fn list_deleted(&self) -> AppResult<Vec<RecipeWithCategory>> {
        self.repo.list_deleted().await
    }

    pub async fn counts(&self) -> AppResult<RecordCounts> {
        self.repo.counts().await
    }

    /// Soft-deleted categories are accepted; only a missing row is rejected.
    async fn ensure_category(&self, category_id: Option<i32>) -> AppResult<()> {
        let Some(category_id) = category_id else {
            return Ok(());
        };

        if self.categories.find_by_id(category_id, true).await?.is_none() {
            return Err(AppError::Validation {
                field: "category_id".to_string(),
                reason: format!("Category {} does not exist", category_id),
            });
        }
        Ok(())
    }
}
