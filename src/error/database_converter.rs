use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Constraint violations become `Duplicate` or `Validation` errors so callers
/// can tell a rejected write apart from an unreachable or failing database.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let details = info.details();
        let constraint_name = info.constraint_name();

        let converted = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(message, details, constraint_name).map(
                    |(entity, field, value)| AppError::Duplicate {
                        entity,
                        field,
                        value,
                    },
                )
            }
            DatabaseErrorKind::NotNullViolation => ConstraintParser::parse_not_null_violation(
                message,
            )
            .map(|(entity, field)| AppError::Validation {
                field,
                reason: format!("Field is required for {}", entity),
            }),
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(message, details, constraint_name)
                    .map(|(entity, field, value)| AppError::Validation {
                        field,
                        reason: format!(
                            "Invalid reference from {} with value '{}'",
                            entity, value
                        ),
                    })
            }
            DatabaseErrorKind::CheckViolation => {
                ConstraintParser::parse_check_violation(message, constraint_name).map(
                    |(entity, field)| AppError::Validation {
                        field,
                        reason: format!("Check constraint failed for {} field", entity),
                    },
                )
            }
            _ => None,
        };

        converted.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(format!("{:?}: {}", kind, message)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        details: Option<String>,
        constraint_name: Option<String>,
    }

    impl MockDatabaseErrorInfo {
        fn boxed(
            message: &str,
            details: Option<&str>,
            constraint_name: Option<&str>,
        ) -> Box<dyn DatabaseErrorInformation + Send + Sync> {
            Box::new(Self {
                message: message.to_string(),
                details: details.map(str::to_string),
                constraint_name: constraint_name.map(str::to_string),
            })
        }
    }

    impl DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            self.details.as_deref()
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn test_convert_not_found_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find recipe");
        assert!(matches!(result, AppError::NotFound { ref field, .. } if field == "id"));
    }

    #[test]
    fn test_convert_duplicate_category_name() {
        let info = MockDatabaseErrorInfo::boxed(
            "duplicate key value violates unique constraint \"categories_name_key\"",
            Some("Key (name)=(Lunch) already exists."),
            Some("categories_name_key"),
        );
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info);

        match DatabaseErrorConverter::convert_diesel_error(error, "insert category") {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "category");
                assert_eq!(field, "name");
                assert_eq!(value, "Lunch");
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_not_null_violation() {
        let info = MockDatabaseErrorInfo::boxed(
            "null value in column \"title\" of relation \"recipes\" violates not-null constraint",
            None,
            None,
        );
        let error = DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, info);

        match DatabaseErrorConverter::convert_diesel_error(error, "insert recipe") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "title");
                assert!(reason.contains("required"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_foreign_key_violation() {
        let info = MockDatabaseErrorInfo::boxed(
            "insert or update on table \"recipes\" violates foreign key constraint \"recipes_category_id_fkey\"",
            Some("Key (category_id)=(999) is not present in table \"categories\"."),
            Some("recipes_category_id_fkey"),
        );
        let error = DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info);

        match DatabaseErrorConverter::convert_diesel_error(error, "insert recipe") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "category_id");
                assert!(reason.contains("999"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_check_violation() {
        let info = MockDatabaseErrorInfo::boxed(
            "new row for relation \"recipes\" violates check constraint \"recipes_servings_check\"",
            None,
            Some("recipes_servings_check"),
        );
        let error = DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info);

        match DatabaseErrorConverter::convert_diesel_error(error, "update recipe") {
            AppError::Validation { field, .. } => assert_eq!(field, "servings"),
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_violation_falls_back_to_database_error() {
        let info = MockDatabaseErrorInfo::boxed("something odd happened", None, None);
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info);

        assert!(matches!(
            DatabaseErrorConverter::convert_diesel_error(error, "insert category"),
            AppError::Database { .. }
        ));
    }

    #[test]
    fn test_other_errors_are_storage_failures() {
        let result =
            DatabaseErrorConverter::convert_diesel_error(DieselError::RollbackTransaction, "update");
        assert!(matches!(result, AppError::Database { ref operation, .. } if operation == "update"));
    }
}
