use std::sync::LazyLock;

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::deserialize_some;
use super::timestamp;
use crate::schema::categories;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s\-éèêëàâäôöûüïî]+$").unwrap());

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: Timestamp,
    #[serde(serialize_with = "timestamp::serialize")]
    pub updated_at: Timestamp,
    #[serde(serialize_with = "timestamp::serialize_option")]
    pub deleted_at: Option<Timestamp>,
}

impl Category {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A category with the number of active recipes that reference it.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub recipe_count: i64,
}

#[derive(Debug, Clone, Default, Insertable, Deserialize, Validate)]
#[diesel(table_name = categories)]
pub struct NewCategory {
    #[validate(
        length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"),
        regex(path = *NAME_PATTERN, message = "Name may only contain letters, spaces and hyphens")
    )]
    pub name: String,
    #[validate(length(max = 500, message = "Description can be at most 500 characters"))]
    pub description: Option<String>,
}

/// Partial update for a category; `description: Some(None)` clears it.
#[derive(Debug, Clone, Default, AsChangeset, Deserialize, Validate)]
#[diesel(table_name = categories)]
pub struct UpdateCategory {
    #[validate(
        length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"),
        regex(path = *NAME_PATTERN, message = "Name may only contain letters, spaces and hyphens")
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(length(max = 500, message = "Description can be at most 500 characters"))]
    pub description: Option<Option<String>>,
}

impl UpdateCategory {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
