//! Recipe repository for async database operations.
//!
//! Every read joins `categories` so results carry the category name. Listing
//! runs the page query and a count over the same filters, built once by
//! [`filtered`].

use diesel::dsl::{IntoBoxed, LeftJoin, sql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use jiff_diesel::Timestamp;

use super::{RecordCounts, contains_pattern};
use crate::db::{AsyncDbPool, get_connection};
use crate::error::{AppError, AppResult};
use crate::models::timestamp;
use crate::models::{
    NewRecipe, Pagination, Recipe, RecipePage, RecipeQuery, RecipeSort, RecipeWithCategory,
    SortOrder, UpdateRecipe,
};
use crate::schema::{categories, recipes};

define_sql_function!(fn lower(x: Text) -> Text);

type RecipeSource = LeftJoin<recipes::table, categories::table>;
type BoxedRecipeQuery = IntoBoxed<'static, RecipeSource, Pg>;

const TOTAL_TIME: &str = "COALESCE(recipes.prep_time, 0) + COALESCE(recipes.cook_time, 0)";

/// Recipe repository holding an async connection pool.
#[derive(Clone)]
pub struct RecipeRepository {
    pool: AsyncDbPool,
}

impl RecipeRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Lists recipes matching every filter in `query`, one page at a time.
    ///
    /// # Arguments
    /// * `query` - Resolved filters, sort and page window
    ///
    /// # Returns
    /// The page plus pagination, where `total` counts all matching rows
    pub async fn list(&self, query: &RecipeQuery) -> AppResult<RecipePage> {
        tracing::debug!(?query, "Listing recipes");
        let mut conn = get_connection(&self.pool).await?;

        let rows = sorted(filtered(query), query.sort, query.order)
            .select((Recipe::as_select(), categories::name.nullable()))
            .limit(query.limit)
            .offset(query.offset)
            .load::<(Recipe, Option<String>)>(&mut conn)
            .await?;

        let total = filtered(query)
            .count()
            .get_result::<i64>(&mut conn)
            .await?;

        let recipes: Vec<RecipeWithCategory> = rows.into_iter().map(Into::into).collect();
        let pagination = Pagination::new(total, query.limit, query.offset, recipes.len());

        Ok(RecipePage {
            recipes,
            pagination,
        })
    }

    /// Finds a recipe by id.
    ///
    /// # Arguments
    /// * `recipe_id` - The recipe's ID
    /// * `include_deleted` - Whether a soft-deleted recipe counts as found
    ///
    /// # Returns
    /// `Some(RecipeWithCategory)` if found, `None` otherwise
    pub async fn find_by_id(
        &self,
        recipe_id: i32,
        include_deleted: bool,
    ) -> AppResult<Option<RecipeWithCategory>> {
        let mut conn = get_connection(&self.pool).await?;
        fetch(&mut conn, recipe_id, include_deleted).await
    }

    /// Inserts an active recipe and reads it back.
    ///
    /// Omitted `servings` and `difficulty` take the column defaults.
    pub async fn create(&self, new_recipe: NewRecipe) -> AppResult<RecipeWithCategory> {
        let mut conn = get_connection(&self.pool).await?;

        let new_id: i32 = diesel::insert_into(recipes::table)
            .values(&new_recipe)
            .returning(recipes::id)
            .get_result(&mut conn)
            .await?;

        fetch(&mut conn, new_id, false)
            .await?
            .ok_or_else(|| AppError::not_found("recipe", new_id))
    }

    /// Applies the fields present in `changes` and reads the recipe back.
    ///
    /// An empty change set issues no write. Returns `None`, without writing,
    /// when the recipe is missing or soft-deleted.
    pub async fn update(
        &self,
        recipe_id: i32,
        changes: UpdateRecipe,
    ) -> AppResult<Option<RecipeWithCategory>> {
        let mut conn = get_connection(&self.pool).await?;

        if !changes.is_empty() {
            diesel::update(
                recipes::table
                    .find(recipe_id)
                    .filter(recipes::deleted_at.is_null()),
            )
            .set(&changes)
            .execute(&mut conn)
            .await?;
        }

        fetch(&mut conn, recipe_id, false).await
    }

    /// Soft-deletes an active recipe.
    ///
    /// # Returns
    /// `false` when the recipe is missing or already deleted
    pub async fn delete(&self, recipe_id: i32) -> AppResult<bool> {
        let mut conn = get_connection(&self.pool).await?;

        let changed = diesel::update(
            recipes::table
                .filter(recipes::id.eq(recipe_id))
                .filter(recipes::deleted_at.is_null()),
        )
        .set(recipes::deleted_at.eq(Some(timestamp::now())))
        .execute(&mut conn)
        .await?;

        Ok(changed > 0)
    }

    /// Clears `deleted_at` whatever its current value.
    ///
    /// Callers decide beforehand whether a restore is allowed.
    pub async fn restore(&self, recipe_id: i32) -> AppResult<Option<RecipeWithCategory>> {
        let mut conn = get_connection(&self.pool).await?;

        let changed = diesel::update(recipes::table.find(recipe_id))
            .set(recipes::deleted_at.eq(None::<Timestamp>))
            .execute(&mut conn)
            .await?;

        if changed == 0 {
            return Ok(None);
        }

        fetch(&mut conn, recipe_id, true).await
    }

    /// Permanently removes a recipe, deleted or not.
    pub async fn hard_delete(&self, recipe_id: i32) -> AppResult<bool> {
        let mut conn = get_connection(&self.pool).await?;

        let removed = diesel::delete(recipes::table.find(recipe_id))
            .execute(&mut conn)
            .await?;

        Ok(removed > 0)
    }

    /// All soft-deleted recipes, most recently deleted first.
    pub async fn list_deleted(&self) -> AppResult<Vec<RecipeWithCategory>> {
        let mut conn = get_connection(&self.pool).await?;

        let rows = recipes::table
            .left_join(categories::table)
            .filter(recipes::deleted_at.is_not_null())
            .order_by((recipes::deleted_at.desc(), recipes::id.desc()))
            .select((Recipe::as_select(), categories::name.nullable()))
            .load::<(Recipe, Option<String>)>(&mut conn)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Active and soft-deleted row counts.
    pub async fn counts(&self) -> AppResult<RecordCounts> {
        let mut conn = get_connection(&self.pool).await?;

        let active = recipes::table
            .filter(recipes::deleted_at.is_null())
            .count()
            .get_result::<i64>(&mut conn)
            .await?;
        let deleted = recipes::table
            .filter(recipes::deleted_at.is_not_null())
            .count()
            .get_result::<i64>(&mut conn)
            .await?;

        Ok(RecordCounts { active, deleted })
    }
}

async fn fetch(
    conn: &mut AsyncPgConnection,
    recipe_id: i32,
    include_deleted: bool,
) -> AppResult<Option<RecipeWithCategory>> {
    let mut query = recipes::table
        .left_join(categories::table)
        .filter(recipes::id.eq(recipe_id))
        .into_boxed();

    if !include_deleted {
        query = query.filter(recipes::deleted_at.is_null());
    }

    let row = query
        .select((Recipe::as_select(), categories::name.nullable()))
        .first::<(Recipe, Option<String>)>(conn)
        .await
        .optional()?;

    Ok(row.map(Into::into))
}

/// The joined source with every filter of `query` applied, unsorted.
fn filtered(query: &RecipeQuery) -> BoxedRecipeQuery {
    let mut boxed = recipes::table.left_join(categories::table).into_boxed();

    if !query.include_deleted {
        boxed = boxed.filter(recipes::deleted_at.is_null());
    }

    if let Some(ref term) = query.search {
        let pattern = contains_pattern(term);
        boxed = boxed.filter(
            recipes::title
                .ilike(pattern.clone())
                .or(recipes::description.ilike(pattern.clone()))
                .or(recipes::ingredients.ilike(pattern)),
        );
    }

    if let Some(level) = query.difficulty {
        boxed = boxed.filter(recipes::difficulty.eq(level));
    }

    if let Some(cid) = query.category_id {
        boxed = boxed.filter(recipes::category_id.eq(cid));
    }

    boxed
}

/// Orders by `$key`, breaking ties on id in the same direction.
macro_rules! order_with_tiebreak {
    ($query:expr, $key:expr, $order:expr) => {
        match $order {
            SortOrder::Asc => $query.order_by(($key.asc(), recipes::id.asc())),
            SortOrder::Desc => $query.order_by(($key.desc(), recipes::id.desc())),
        }
    };
}

fn sorted(query: BoxedRecipeQuery, sort: RecipeSort, order: SortOrder) -> BoxedRecipeQuery {
    match sort {
        // `lower` keeps the column's ICU collation
        RecipeSort::Title => order_with_tiebreak!(query, lower(recipes::title), order),
        RecipeSort::PrepTime => order_with_tiebreak!(query, recipes::prep_time, order),
        RecipeSort::CookTime => order_with_tiebreak!(query, recipes::cook_time, order),
        RecipeSort::CreatedAt => order_with_tiebreak!(query, recipes::created_at, order),
        RecipeSort::Servings => order_with_tiebreak!(query, recipes::servings, order),
        RecipeSort::TotalTime => order_with_tiebreak!(query, sql::<Integer>(TOTAL_TIME), order),
    }
}
