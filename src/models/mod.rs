mod category;
mod listing;
mod recipe;
pub(crate) mod timestamp;

pub use category::{Category, CategoryWithCount, NewCategory, UpdateCategory};
pub use listing::{
    CategoryListOptions, CategoryPage, CategoryQuery, ListingConfig, Pagination, RecipeListOptions,
    RecipePage, RecipeQuery, RecipeSort, SortOrder,
};
pub use recipe::{Difficulty, NewRecipe, Recipe, RecipeWithCategory, UpdateRecipe};

use serde::{Deserialize, Deserializer};

/// Deserializes a present field (including an explicit `null`) as `Some(..)`.
///
/// Paired with `#[serde(default)]` so that an absent field stays `None` while
/// `null` becomes `Some(None)`.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
