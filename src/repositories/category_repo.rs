//! Category repository for async database operations.
//!
//! `recipe_count` is always computed over active recipes. Soft deletion is
//! refused while any active recipe still points at the category.

use std::collections::HashMap;

use diesel::dsl::{IntoBoxed, count_star, exists, not};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use jiff_diesel::Timestamp;

use super::{RecordCounts, contains_pattern};
use crate::db::{AsyncDbPool, get_connection};
use crate::error::{AppError, AppResult};
use crate::models::timestamp;
use crate::models::{
    Category, CategoryPage, CategoryQuery, CategoryWithCount, NewCategory, Pagination, Recipe,
    UpdateCategory,
};
use crate::schema::{categories, recipes};

type BoxedCategoryQuery = IntoBoxed<'static, categories::table, Pg>;

/// Category repository holding an async connection pool.
#[derive(Clone)]
pub struct CategoryRepository {
    pool: AsyncDbPool,
}

impl CategoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Lists categories by name, one page at a time.
    ///
    /// # Arguments
    /// * `query` - Resolved search filter and page window
    ///
    /// # Returns
    /// The page plus pagination, where `total` counts all matching rows
    pub async fn list(&self, query: &CategoryQuery) -> AppResult<CategoryPage> {
        tracing::debug!(?query, "Listing categories");
        let mut conn = get_connection(&self.pool).await?;

        let rows = filtered(query)
            .order_by((categories::name.asc(), categories::id.asc()))
            .select(Category::as_select())
            .limit(query.limit)
            .offset(query.offset)
            .load::<Category>(&mut conn)
            .await?;

        let total = filtered(query)
            .count()
            .get_result::<i64>(&mut conn)
            .await?;

        let ids: Vec<i32> = rows.iter().map(|c| c.id).collect();
        let counts = active_recipe_counts(&mut conn, ids).await?;

        let categories: Vec<CategoryWithCount> = rows
            .into_iter()
            .map(|category| {
                let recipe_count = counts.get(&category.id).copied().unwrap_or(0);
                CategoryWithCount {
                    category,
                    recipe_count,
                }
            })
            .collect();
        let pagination = Pagination::new(total, query.limit, query.offset, categories.len());

        Ok(CategoryPage {
            categories,
            pagination,
        })
    }

    /// Finds a category by id together with its active recipe count.
    ///
    /// # Arguments
    /// * `category_id` - The category's ID
    /// * `include_deleted` - Whether a soft-deleted category counts as found
    pub async fn find_by_id(
        &self,
        category_id: i32,
        include_deleted: bool,
    ) -> AppResult<Option<CategoryWithCount>> {
        let mut conn = get_connection(&self.pool).await?;
        fetch(&mut conn, category_id, include_deleted).await
    }

    /// Active recipes assigned to the category, newest first.
    ///
    /// Does not check that the category itself exists.
    pub async fn recipes_of(&self, category_id: i32) -> AppResult<Vec<Recipe>> {
        let mut conn = get_connection(&self.pool).await?;

        recipes::table
            .filter(recipes::category_id.eq(category_id))
            .filter(recipes::deleted_at.is_null())
            .order_by((recipes::created_at.desc(), recipes::id.desc()))
            .select(Recipe::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Inserts an active category and reads it back.
    ///
    /// A clash with another active category's name surfaces as
    /// `AppError::Duplicate` from the partial unique index.
    pub async fn create(&self, new_category: NewCategory) -> AppResult<CategoryWithCount> {
        let mut conn = get_connection(&self.pool).await?;

        let new_id: i32 = diesel::insert_into(categories::table)
            .values(&new_category)
            .returning(categories::id)
            .get_result(&mut conn)
            .await?;

        fetch(&mut conn, new_id, false)
            .await?
            .ok_or_else(|| AppError::not_found("category", new_id))
    }

    /// Applies the fields present in `changes` and reads the category back.
    ///
    /// An empty change set issues no write. Returns `None`, without writing,
    /// when the category is missing or soft-deleted.
    pub async fn update(
        &self,
        category_id: i32,
        changes: UpdateCategory,
    ) -> AppResult<Option<CategoryWithCount>> {
        let mut conn = get_connection(&self.pool).await?;

        if !changes.is_empty() {
            diesel::update(
                categories::table
                    .find(category_id)
                    .filter(categories::deleted_at.is_null()),
            )
            .set(&changes)
            .execute(&mut conn)
            .await?;
        }

        fetch(&mut conn, category_id, false).await
    }

    /// Whether an active category other than `exclude_id` is named exactly `category_name`.
    pub async fn exists_by_name(
        &self,
        category_name: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let mut conn = get_connection(&self.pool).await?;

        let mut query = categories::table
            .filter(categories::name.eq(category_name.to_string()))
            .filter(categories::deleted_at.is_null())
            .into_boxed();

        if let Some(excluded) = exclude_id {
            query = query.filter(categories::id.ne(excluded));
        }

        let found = query
            .select(categories::id)
            .first::<i32>(&mut conn)
            .await
            .optional()?;

        Ok(found.is_some())
    }

    /// The active category named exactly `category_name`.
    pub async fn find_by_name(&self, category_name: &str) -> AppResult<Option<Category>> {
        let mut conn = get_connection(&self.pool).await?;

        categories::table
            .filter(categories::name.eq(category_name))
            .filter(categories::deleted_at.is_null())
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Soft-deletes an active category with no active recipes.
    ///
    /// The update itself re-checks for active recipes, so a recipe assigned
    /// between the count and the write still blocks the delete.
    ///
    /// # Returns
    /// `false` when the category is missing or already deleted
    ///
    /// # Errors
    /// `AppError::Conflict` while active recipes reference the category
    pub async fn delete(&self, category_id: i32) -> AppResult<bool> {
        let mut conn = get_connection(&self.pool).await?;

        let active = active_recipe_count(&mut conn, category_id).await?;
        if active > 0 {
            return Err(still_referenced(category_id, active));
        }

        let changed = diesel::update(
            categories::table
                .filter(categories::id.eq(category_id))
                .filter(categories::deleted_at.is_null())
                .filter(not(exists(
                    recipes::table
                        .filter(recipes::category_id.eq(category_id))
                        .filter(recipes::deleted_at.is_null()),
                ))),
        )
        .set(categories::deleted_at.eq(Some(timestamp::now())))
        .execute(&mut conn)
        .await?;

        if changed > 0 {
            return Ok(true);
        }

        let active = active_recipe_count(&mut conn, category_id).await?;
        if active > 0 {
            tracing::warn!(category_id, active, "Recipe assigned while deleting category");
            return Err(still_referenced(category_id, active));
        }

        Ok(false)
    }

    /// Clears `deleted_at` whatever its current value.
    pub async fn restore(&self, category_id: i32) -> AppResult<Option<CategoryWithCount>> {
        let mut conn = get_connection(&self.pool).await?;

        let changed = diesel::update(categories::table.find(category_id))
            .set(categories::deleted_at.eq(None::<Timestamp>))
            .execute(&mut conn)
            .await?;

        if changed == 0 {
            return Ok(None);
        }

        fetch(&mut conn, category_id, true).await
    }

    /// Active and soft-deleted row counts.
    pub async fn counts(&self) -> AppResult<RecordCounts> {
        let mut conn = get_connection(&self.pool).await?;

        let active = categories::table
            .filter(categories::deleted_at.is_null())
            .count()
            .get_result::<i64>(&mut conn)
            .await?;
        let deleted = categories::table
            .filter(categories::deleted_at.is_not_null())
            .count()
            .get_result::<i64>(&mut conn)
            .await?;

        Ok(RecordCounts { active, deleted })
    }
}

fn still_referenced(category_id: i32, active: i64) -> AppError {
    AppError::conflict(format!(
        "Category {} still has {} active recipe(s)",
        category_id, active
    ))
}

async fn fetch(
    conn: &mut AsyncPgConnection,
    category_id: i32,
    include_deleted: bool,
) -> AppResult<Option<CategoryWithCount>> {
    let mut query = categories::table
        .filter(categories::id.eq(category_id))
        .into_boxed();

    if !include_deleted {
        query = query.filter(categories::deleted_at.is_null());
    }

    let Some(category) = query
        .select(Category::as_select())
        .first::<Category>(conn)
        .await
        .optional()?
    else {
        return Ok(None);
    };

    let recipe_count = active_recipe_count(conn, category.id).await?;

    Ok(Some(CategoryWithCount {
        category,
        recipe_count,
    }))
}

async fn active_recipe_count(conn: &mut AsyncPgConnection, category_id: i32) -> AppResult<i64> {
    recipes::table
        .filter(recipes::category_id.eq(category_id))
        .filter(recipes::deleted_at.is_null())
        .count()
        .get_result(conn)
        .await
        .map_err(AppError::from)
}

/// Active recipe counts for a page of categories; ids without recipes are absent.
async fn active_recipe_counts(
    conn: &mut AsyncPgConnection,
    ids: Vec<i32>,
) -> AppResult<HashMap<i32, i64>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = recipes::table
        .filter(recipes::deleted_at.is_null())
        .filter(recipes::category_id.eq_any(ids))
        .group_by(recipes::category_id)
        .select((recipes::category_id, count_star()))
        .load::<(Option<i32>, i64)>(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(cid, count)| cid.map(|cid| (cid, count)))
        .collect())
}

fn filtered(query: &CategoryQuery) -> BoxedCategoryQuery {
    let mut boxed = categories::table.into_boxed();

    if !query.include_deleted {
        boxed = boxed.filter(categories::deleted_at.is_null());
    }

    if let Some(ref term) = query.search {
        let pattern = contains_pattern(term);
        boxed = boxed.filter(
            categories::name
                .ilike(pattern.clone())
                .or(categories::description.ilike(pattern)),
        );
    }

    boxed
}
