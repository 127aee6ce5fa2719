use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use jiff_diesel::Timestamp;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::deserialize_some;
use super::timestamp;
use crate::schema::recipes;

/// Letters (accented Dutch/French ones included), digits, whitespace and `-,.'`.
static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s\-,.'éèêëàâäôöûüïî]+$").unwrap());

/// How demanding a recipe is to prepare.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, DbEnum,
)]
#[db_enum(existing_type_path = "crate::schema::sql_types::RecipeDifficulty")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "Invalid difficulty '{}'. Valid values: easy, medium, hard",
                other
            )),
        }
    }
}

/// Recipe row as stored.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: String,
    pub instructions: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: Difficulty,
    pub category_id: Option<i32>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: Timestamp,
    #[serde(serialize_with = "timestamp::serialize")]
    pub updated_at: Timestamp,
    #[serde(serialize_with = "timestamp::serialize_option")]
    pub deleted_at: Option<Timestamp>,
}

impl Recipe {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A recipe annotated with the name of the category it points at.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeWithCategory {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub category_name: Option<String>,
}

impl From<(Recipe, Option<String>)> for RecipeWithCategory {
    fn from((recipe, category_name): (Recipe, Option<String>)) -> Self {
        Self {
            recipe,
            category_name,
        }
    }
}

/// NewRecipe model for inserting new records.
///
/// `servings` and `difficulty` fall back to the column defaults (1 and
/// medium) when left out; `category_id` stays null.
#[derive(Debug, Clone, Default, Insertable, Deserialize, Validate)]
#[diesel(table_name = recipes)]
#[validate(schema(function = "validate_new_total_time"))]
pub struct NewRecipe {
    #[validate(
        length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"),
        regex(path = *TITLE_PATTERN, message = "Title contains invalid characters")
    )]
    pub title: String,
    #[validate(length(max = 1000, message = "Description can be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 10, message = "Ingredients must be at least 10 characters"))]
    pub ingredients: String,
    #[validate(length(min = 20, message = "Instructions must be at least 20 characters"))]
    pub instructions: String,
    #[validate(range(min = 0, max = 1440, message = "Prep time must be between 0 and 1440 minutes"))]
    pub prep_time: i32,
    #[validate(range(min = 0, max = 1440, message = "Cook time must be between 0 and 1440 minutes"))]
    pub cook_time: i32,
    #[validate(range(min = 1, max = 100, message = "Servings must be between 1 and 100"))]
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    #[validate(range(min = 1, message = "Category id must be a positive integer"))]
    pub category_id: Option<i32>,
}

fn validate_new_total_time(recipe: &NewRecipe) -> Result<(), ValidationError> {
    check_total_time(recipe.prep_time, recipe.cook_time)
}

fn check_total_time(prep_time: i32, cook_time: i32) -> Result<(), ValidationError> {
    if prep_time + cook_time < 1 {
        return Err(ValidationError::new("total_time")
            .with_message("Total time (prep + cook) must be at least 1 minute".into()));
    }
    Ok(())
}

/// Partial update for a recipe.
///
/// `None` leaves a column untouched. Nullable columns use a nested option so
/// `Some(None)` (an explicit JSON `null`) clears them.
#[derive(Debug, Clone, Default, AsChangeset, Deserialize, Validate)]
#[diesel(table_name = recipes)]
#[validate(schema(function = "validate_update_total_time"))]
pub struct UpdateRecipe {
    #[validate(
        length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"),
        regex(path = *TITLE_PATTERN, message = "Title contains invalid characters")
    )]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(length(max = 1000, message = "Description can be at most 1000 characters"))]
    pub description: Option<Option<String>>,
    #[validate(length(min = 10, message = "Ingredients must be at least 10 characters"))]
    pub ingredients: Option<String>,
    #[validate(length(min = 20, message = "Instructions must be at least 20 characters"))]
    pub instructions: Option<String>,
    #[validate(range(min = 0, max = 1440, message = "Prep time must be between 0 and 1440 minutes"))]
    pub prep_time: Option<i32>,
    #[validate(range(min = 0, max = 1440, message = "Cook time must be between 0 and 1440 minutes"))]
    pub cook_time: Option<i32>,
    #[validate(range(min = 1, max = 100, message = "Servings must be between 1 and 100"))]
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(range(min = 1, message = "Category id must be a positive integer"))]
    pub category_id: Option<Option<i32>>,
}

fn validate_update_total_time(update: &UpdateRecipe) -> Result<(), ValidationError> {
    match (update.prep_time, update.cook_time) {
        (Some(prep_time), Some(cook_time)) => check_total_time(prep_time, cook_time),
        _ => Ok(()),
    }
}

impl UpdateRecipe {
    /// True when applying this update would not touch any column.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.ingredients.is_none()
            && self.instructions.is_none()
            && self.prep_time.is_none()
            && self.cook_time.is_none()
            && self.servings.is_none()
            && self.difficulty.is_none()
            && self.category_id.is_none()
    }

    /// The category this update assigns, if it assigns a non-null one.
    pub fn assigned_category(&self) -> Option<i32> {
        self.category_id.flatten()
    }
}
