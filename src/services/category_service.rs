//! Category service for business logic operations.
//!
//! Name uniqueness is checked here first so callers get a `Duplicate` naming
//! the clashing value; the partial unique index catches any race.

use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{
    CategoryListOptions, CategoryPage, CategoryWithCount, ListingConfig, NewCategory, Recipe,
    UpdateCategory,
};
use crate::repositories::{CategoryRepository, RecordCounts};

#[derive(Clone)]
pub struct CategoryService {
    repo: CategoryRepository,
    listing: ListingConfig,
}

impl CategoryService {
    pub fn new(repo: CategoryRepository, listing: ListingConfig) -> Self {
        Self { repo, listing }
    }

    /// Lists categories by name after validating and resolving the raw options.
    pub async fn list(&self, options: CategoryListOptions) -> AppResult<CategoryPage> {
        options.validate()?;
        let query = options.resolve(&self.listing);
        self.repo.list(&query).await
    }

    /// Gets a category with its active recipe count, or `NotFound`.
    pub async fn get(&self, id: i32, include_deleted: bool) -> AppResult<CategoryWithCount> {
        self.repo
            .find_by_id(id, include_deleted)
            .await?
            .ok_or_else(|| AppError::not_found("category", id))
    }

    /// Active recipes of an active category.
    ///
    /// # Errors
    /// `NotFound` when the category is missing or soft-deleted, so an empty
    /// list always means "no recipes"
    pub async fn recipes(&self, id: i32) -> AppResult<Vec<Recipe>> {
        self.get(id, false).await?;
        self.repo.recipes_of(id).await
    }

    /// Creates a category.
    ///
    /// # Errors
    /// - `ValidationErrors` when a field is out of range
    /// - `Duplicate` when an active category already has this name
    pub async fn create(&self, new_category: NewCategory) -> AppResult<CategoryWithCount> {
        new_category.validate()?;
        self.ensure_unique_name(&new_category.name, None).await?;

        let created = self.repo.create(new_category).await?;
        tracing::info!(category_id = created.category.id, "Category created");
        Ok(created)
    }

    /// Applies a partial update to an active category.
    pub async fn update(&self, id: i32, changes: UpdateCategory) -> AppResult<CategoryWithCount> {
        changes.validate()?;
        self.get(id, false).await?;
        if let Some(ref name) = changes.name {
            self.ensure_unique_name(name, Some(id)).await?;
        }

        let touched = !changes.is_empty();
        let updated = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("category", id))?;

        if touched {
            tracing::info!(category_id = id, "Category updated");
        }
        Ok(updated)
    }

    /// Soft-deletes an active category that no active recipe references.
    ///
    /// # Errors
    /// - `NotFound` when the category is missing or already deleted
    /// - `Conflict` while active recipes reference it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get(id, false).await?;

        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("category", id));
        }
        tracing::info!(category_id = id, "Category soft-deleted");
        Ok(())
    }

    /// Restores a soft-deleted category.
    ///
    /// # Errors
    /// - `NotFound` when no category has this id
    /// - `Conflict` when the category is not deleted
    pub async fn restore(&self, id: i32) -> AppResult<CategoryWithCount> {
        let current = self.get(id, true).await?;
        if !current.category.is_deleted() {
            return Err(AppError::conflict(format!("Category {} is not deleted", id)));
        }

        let restored = self
            .repo
            .restore(id)
            .await?
            .ok_or_else(|| AppError::not_found("category", id))?;
        tracing::info!(category_id = id, "Category restored");
        Ok(restored)
    }

    pub async fn counts(&self) -> AppResult<RecordCounts> {
        self.repo.counts().await
    }

    async fn ensure_unique_name(&self, name: &str, exclude_id: Option<i32>) -> AppResult<()> {
        if self.repo.exists_by_name(name, exclude_id).await? {
            return Err(AppError::Duplicate {
                entity: "category".to_string(),
                field: "name".to_string(),
                value: name.to_string(),
            });
        }
        Ok(())
    }
}
