use regex::Regex;
use std::sync::OnceLock;

/// Suffixes PostgreSQL (and our migrations) append to generated constraint and index names.
const CONSTRAINT_SUFFIXES: [&str; 5] = ["_key", "_fkey", "_check", "_idx", "_pkey"];

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// Pulls the table, column and offending value out of the message and DETAIL
/// text so violations can be reported as structured `AppError` variants.
pub struct ConstraintParser;

/// Compiled regex patterns for constraint parsing
struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    relation_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // "Key (name)=(Dessert) already exists."
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap(),
            column_name: Regex::new(r#"column "([^"]+)""#).unwrap(),
            // "on table \"recipes\"" and "of relation \"recipes\"" both name the table
            relation_name: Regex::new(r#"(?:table|relation) "([^"]+)""#).unwrap(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique violation into `(entity, field, value)`.
    ///
    /// The constraint or index name decides entity and field
    /// (`categories_name_key` -> `category`, `name`); the value comes from the
    /// `Key (..)=(..)` detail line when PostgreSQL provides one.
    ///
    /// # Arguments
    /// * `message` - The primary database error message
    /// * `details` - The DETAIL part of the error, if any
    /// * `constraint_name` - Constraint or index name reported by the database
    pub fn parse_unique_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::extract_key_value(message, details);

        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = key_value
                .map(|(_, value)| value)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = key_value?;
        let entity = Self::extract_relation_from_message(message)
            .map(|table| Self::singular(&table))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a not-null violation into `(entity, field)`.
    pub fn parse_not_null_violation(message: &str) -> Option<(String, String)> {
        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_relation_from_message(message)
            .map(|table| Self::singular(&table))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Parses a foreign key violation into `(entity, field, referenced_value)`.
    ///
    /// For `recipes_category_id_fkey` with `Key (category_id)=(99)` this yields
    /// `("recipe", "category_id", "99")`.
    pub fn parse_foreign_key_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::extract_key_value(message, details);

        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = key_value
                .map(|(_, value)| value)
                .unwrap_or_else(|| "invalid_reference".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = key_value?;
        let entity = Self::extract_relation_from_message(message)
            .map(|table| Self::singular(&table))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a check violation into `(entity, field)`.
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        constraint_name
            .and_then(Self::parse_constraint_name)
            .or_else(|| Self::parse_not_null_violation(message))
    }

    /// Splits a `{table}_{column}_{suffix}` name into a singular entity and the column.
    ///
    /// Multi-word columns survive intact:
    /// - `categories_name_key` -> `("category", "name")`
    /// - `recipes_prep_time_check` -> `("recipe", "prep_time")`
    /// - `recipes_category_id_fkey` -> `("recipe", "category_id")`
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint_name.strip_suffix(suffix))?;
        let (table, field) = stem.split_once('_')?;
        if table.is_empty() || field.is_empty() {
            return None;
        }
        Some((Self::singular(table), field.to_string()))
    }

    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_relation_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .relation_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extracts `(field, value)` from a `Key (field)=(value)` fragment.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }

    // libpq reports the DETAIL line separately; older servers inline it in the message.
    fn extract_key_value(message: &str, details: Option<&str>) -> Option<(String, String)> {
        details
            .and_then(Self::extract_key_value_from_message)
            .or_else(|| Self::extract_key_value_from_message(message))
    }

    fn singular(table: &str) -> String {
        if let Some(stem) = table.strip_suffix("ies") {
            format!("{stem}y")
        } else if let Some(stem) = table.strip_suffix('s') {
            stem.to_string()
        } else {
            table.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unique_violation_from_details() {
        let message = "duplicate key value violates unique constraint \"categories_name_key\"";
        let details = "Key (name)=(Dessert) already exists.";
        let result =
            ConstraintParser::parse_unique_violation(message, Some(details), Some("categories_name_key"));
        assert_eq!(
            result,
            Some(("category".to_string(), "name".to_string(), "Dessert".to_string()))
        );
    }

    #[test]
    fn test_parse_unique_violation_inline_detail_without_constraint() {
        let message = "duplicate key value violates unique constraint\nDETAIL: Key (name)=(Vegan) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, None, None);
        assert_eq!(
            result,
            Some(("resource".to_string(), "name".to_string(), "Vegan".to_string()))
        );
    }

    #[test]
    fn test_parse_unique_violation_without_value() {
        let result = ConstraintParser::parse_unique_violation(
            "duplicate key value violates unique constraint \"categories_name_key\"",
            None,
            Some("categories_name_key"),
        );
        assert_eq!(
            result,
            Some(("category".to_string(), "name".to_string(), "duplicate_value".to_string()))
        );
    }

    #[test]
    fn test_parse_not_null_violation_with_relation() {
        let message = "null value in column \"title\" of relation \"recipes\" violates not-null constraint";
        assert_eq!(
            ConstraintParser::parse_not_null_violation(message),
            Some(("recipe".to_string(), "title".to_string()))
        );
    }

    #[test]
    fn test_parse_foreign_key_violation() {
        let message = "insert or update on table \"recipes\" violates foreign key constraint \"recipes_category_id_fkey\"";
        let details = "Key (category_id)=(999) is not present in table \"categories\".";
        let result = ConstraintParser::parse_foreign_key_violation(
            message,
            Some(details),
            Some("recipes_category_id_fkey"),
        );
        assert_eq!(
            result,
            Some(("recipe".to_string(), "category_id".to_string(), "999".to_string()))
        );
    }

    #[test]
    fn test_parse_check_violation_keeps_multi_word_column() {
        let message = "new row for relation \"recipes\" violates check constraint \"recipes_prep_time_check\"";
        let result = ConstraintParser::parse_check_violation(message, Some("recipes_prep_time_check"));
        assert_eq!(result, Some(("recipe".to_string(), "prep_time".to_string())));
    }

    #[test]
    fn test_parse_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("categories_name_key"),
            Some(("category".to_string(), "name".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("recipes_servings_check"),
            Some(("recipe".to_string(), "servings".to_string()))
        );
        assert_eq!(ConstraintParser::parse_constraint_name("categories_pkey"), None);
        assert_eq!(ConstraintParser::parse_constraint_name("invalid"), None);
    }

    #[test]
    fn test_extract_relation_from_message() {
        assert_eq!(
            ConstraintParser::extract_relation_from_message("update on table \"recipes\" violates"),
            Some("recipes".to_string())
        );
        assert_eq!(ConstraintParser::extract_relation_from_message("nothing here"), None);
    }

    #[test]
    fn test_graceful_parsing_failures() {
        let message = "completely unrelated error message";
        assert_eq!(ConstraintParser::parse_unique_violation(message, None, None), None);
        assert_eq!(ConstraintParser::parse_not_null_violation(message), None);
        assert_eq!(ConstraintParser::parse_foreign_key_violation(message, None, None), None);
        assert_eq!(ConstraintParser::parse_check_violation(message, None), None);
    }
}
