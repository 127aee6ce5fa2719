//! List options, their resolved query form, and paginated results.
//!
//! Raw options arrive with every field optional (as a query string would
//! deserialize). They are validated, then resolved once against
//! [`ListingConfig`] into a fully populated query the repositories consume.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{CategoryWithCount, Difficulty, RecipeWithCategory};

/// Default page sizes and the page size ceiling for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingConfig {
    pub recipe_limit: i64,
    pub category_limit: i64,
    pub max_limit: i64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            recipe_limit: 10,
            category_limit: 50,
            max_limit: 100,
        }
    }
}

/// Keys recipes can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeSort {
    Title,
    PrepTime,
    CookTime,
    #[default]
    CreatedAt,
    Servings,
    TotalTime,
}

impl RecipeSort {
    /// Maps a requested sort key; anything unrecognised sorts by creation time.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("title") => RecipeSort::Title,
            Some("prep_time") => RecipeSort::PrepTime,
            Some("cook_time") => RecipeSort::CookTime,
            Some("servings") => RecipeSort::Servings,
            Some("total_time") => RecipeSort::TotalTime,
            _ => RecipeSort::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `asc` in any casing is ascending, everything else is descending.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Recipe list options as received from the caller.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecipeListOptions {
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<i64>,
    #[validate(range(min = 0, message = "Offset must be 0 or greater"))]
    pub offset: Option<i64>,
    #[validate(length(min = 2, max = 100, message = "Search must be between 2 and 100 characters"))]
    pub search: Option<String>,
    pub difficulty: Option<Difficulty>,
    #[validate(range(min = 1, message = "Category id must be a positive integer"))]
    pub category_id: Option<i32>,
    pub sort: Option<String>,
    pub order: Option<String>,
    #[serde(alias = "includeDeleted")]
    pub include_deleted: Option<bool>,
}

/// A fully resolved recipe listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeQuery {
    pub limit: i64,
    pub offset: i64,
    pub search: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub category_id: Option<i32>,
    pub sort: RecipeSort,
    pub order: SortOrder,
    pub include_deleted: bool,
}

impl RecipeListOptions {
    pub fn resolve(self, config: &ListingConfig) -> RecipeQuery {
        RecipeQuery {
            limit: clamp_limit(self.limit, config.recipe_limit, config.max_limit),
            offset: self.offset.unwrap_or(0).max(0),
            search: normalize_search(self.search),
            difficulty: self.difficulty,
            category_id: self.category_id,
            sort: RecipeSort::parse_lenient(self.sort.as_deref()),
            order: SortOrder::parse_lenient(self.order.as_deref()),
            include_deleted: self.include_deleted.unwrap_or(false),
        }
    }
}

/// Category list options as received from the caller.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryListOptions {
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<i64>,
    #[validate(range(min = 0, message = "Offset must be 0 or greater"))]
    pub offset: Option<i64>,
    #[validate(length(min = 2, max = 100, message = "Search must be between 2 and 100 characters"))]
    pub search: Option<String>,
    #[serde(alias = "includeDeleted")]
    pub include_deleted: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryQuery {
    pub limit: i64,
    pub offset: i64,
    pub search: Option<String>,
    pub include_deleted: bool,
}

impl CategoryListOptions {
    pub fn resolve(self, config: &ListingConfig) -> CategoryQuery {
        CategoryQuery {
            limit: clamp_limit(self.limit, config.category_limit, config.max_limit),
            offset: self.offset.unwrap_or(0).max(0),
            search: normalize_search(self.search),
            include_deleted: self.include_deleted.unwrap_or(false),
        }
    }
}

fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max.max(1))
}

/// Blank terms disable the filter; anything else is matched verbatim,
/// surrounding spaces included.
fn normalize_search(search: Option<String>) -> Option<String> {
    search.filter(|s| !s.trim().is_empty())
}

/// Pagination block returned alongside every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Rows matching the filters, ignoring limit and offset
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    /// Rows in this page
    pub returned: usize,
}

impl Pagination {
    pub fn new(total: i64, limit: i64, offset: i64, returned: usize) -> Self {
        Self {
            total,
            limit,
            offset,
            returned,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipePage {
    pub recipes: Vec<RecipeWithCategory>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryPage {
    pub categories: Vec<CategoryWithCount>,
    pub pagination: Pagination,
}
