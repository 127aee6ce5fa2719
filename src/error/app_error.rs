use crate::error::DatabaseErrorConverter;
use serde::Serialize;
use thiserror::Error;

/// Application-wide error type that represents all possible errors in the system.
///
/// The variants group into four kinds: not found, conflict (`Duplicate` and
/// `Conflict`), validation (`Validation`, `ValidationErrors`) and
/// storage (`Database`, `ConnectionPool`). `Configuration` and `Internal` cover
/// the process around the stores.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Duplicate entry error for unique constraint violations
    #[error("Duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// A state transition the current record state does not allow
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Field errors collected by `validator`
    #[error("Validation failed: {}", format_field_errors(.errors))]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

/// A single field failure reported by input validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

fn format_field_errors(errors: &[ValidationFieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            field: "id".to_string(),
            value: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict {
            message: message.into(),
        }
    }

    /// Whether this error belongs to the conflict kind (duplicates included).
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict { .. } | AppError::Duplicate { .. })
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut errors: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| ValidationFieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", error.code)),
                })
            })
            .collect();
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
        name: String,
        #[validate(range(min = 1))]
        servings: i32,
    }

    #[test]
    fn test_validation_errors_are_flattened_and_sorted() {
        let sample = Sample {
            name: "ab".to_string(),
            servings: 0,
        };
        let error = AppError::from(sample.validate().unwrap_err());

        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "name");
                assert_eq!(errors[0].message, "Name must be at least 3 characters");
                assert_eq!(errors[1].field, "servings");
                assert!(errors[1].message.contains("range"));
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_conflict_kind() {
        assert!(AppError::conflict("category still has recipes").is_conflict());
        assert!(
            AppError::Duplicate {
                entity: "category".into(),
                field: "name".into(),
                value: "Vegan".into(),
            }
            .is_conflict()
        );
        assert!(!AppError::not_found("recipe", 1).is_conflict());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            AppError::not_found("recipe", 42).to_string(),
            "Resource not found: recipe with id=42"
        );
        let errors = AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "title".into(),
                message: "too short".into(),
            }],
        };
        assert_eq!(errors.to_string(), "Validation failed: title: too short");
    }
}
