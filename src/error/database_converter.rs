use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

use crate::error::{AppError, ConstraintParser, ConstraintViolation};

/// Utility for converting Diesel errors to structured AppError variants.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an AppError.
    ///
    /// Constraint violations keep the parsed constraint details in the error
    /// message; everything ends up as `AppError::Database` because at this
    /// level there is no domain context to say more. Callers that can do
    /// better (the customer repository for telephone conflicts) inspect the
    /// error with [`DatabaseErrorConverter::unique_violation`] first.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    /// Returns the violated unique constraint, if this is a unique violation.
    pub fn unique_violation(error: &DieselError) -> Option<ConstraintViolation> {
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                ConstraintParser::parse_unique_violation(
                    info.message(),
                    info.details(),
                    info.constraint_name(),
                )
            }
            _ => None,
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

        let description = match kind {
            DatabaseErrorKind::UniqueViolation => {
                match ConstraintParser::parse_unique_violation(message, details, constraint_name) {
                    Some(v) => format!(
                        "Unique constraint violation: {}.{} = '{}' already exists",
                        v.table, v.column, v.value
                    ),
                    None => format!("Unique constraint violation: {}", message),
                }
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                match ConstraintParser::parse_foreign_key_violation(
                    message,
                    details,
                    constraint_name,
                ) {
                    Some(v) => format!(
                        "Foreign key constraint violation: {}.{} references missing value '{}'",
                        v.table, v.column, v.value
                    ),
                    None => format!("Foreign key constraint violation: {}", message),
                }
            }
            DatabaseErrorKind::CheckViolation => format!(
                "Check constraint violation ({}): {}",
                constraint_name.unwrap_or("unknown"),
                message
            ),
            DatabaseErrorKind::NotNullViolation => {
                format!("Not null constraint violation: {}", message)
            }
            _ => format!("Database error: {}", message),
        };

        AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(description),
        }
    }
}
