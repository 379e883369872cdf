use std::fmt;

use thiserror::Error;

use crate::config::error::ConfigError;
use crate::error::{DatabaseErrorConverter, FieldErrors};

/// The kind of entity a not-found error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Customer,
    Purchase,
    Repair,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Customer => "customer",
            Resource::Purchase => "purchase",
            Resource::Repair => "repair",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application-wide error type.
///
/// Repositories, services and extractors all return this type, and the HTTP
/// layer turns it into a response with a single exhaustive match.
#[derive(Error, Debug)]
pub enum AppError {
    /// A customer, purchase or repair with the given id does not exist
    #[error("{resource} with given id '{id}' does not exist")]
    NotFound { resource: Resource, id: String },

    /// Another customer already owns this telephone number
    #[error(
        "customer '{first_name} {last_name}' cannot be saved: telephone number '{telephone_number}' is already in use"
    )]
    DuplicateTelephoneNumber {
        telephone_number: String,
        first_name: String,
        last_name: String,
    },

    /// One or more request fields failed validation
    #[error("Validation failed for {} field(s)", errors.len())]
    Validation { errors: FieldErrors },

    /// A path parameter that should be a UUID is not one
    #[error("given {param} '{value}' is not a valid UUID")]
    MalformedIdentifier { param: &'static str, value: String },

    /// Bad request error with descriptive message
    #[error("{message}")]
    BadRequest { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}: {source}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Database connection unavailable: {source}")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error for '{key}': {message}")]
    Configuration { key: String, message: String },

    /// Internal error for unexpected failures
    #[error("Internal error: {source}")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn not_found(resource: Resource, id: impl ToString) -> Self {
        AppError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
        }
    }

    pub fn storage(operation: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        AppError::Database {
            operation: operation.into(),
            source: source.into(),
        }
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

impl From<bb8::RunError<diesel_async::pooled_connection::PoolError>> for AppError {
    fn from(error: bb8::RunError<diesel_async::pooled_connection::PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::ValidationError { field, message } => AppError::Configuration {
                key: field,
                message,
            },
            other => AppError::Configuration {
                key: "configuration".to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation { errors }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_resource_and_id() {
        let error = AppError::not_found(Resource::Purchase, "abc");
        assert_eq!(
            error.to_string(),
            "purchase with given id 'abc' does not exist"
        );
    }

    #[test]
    fn test_malformed_identifier_message() {
        let error = AppError::MalformedIdentifier {
            param: "customer id",
            value: "not-a-uuid".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "given customer id 'not-a-uuid' is not a valid UUID"
        );
    }

    #[test]
    fn test_duplicate_message_mentions_number_and_name() {
        let error = AppError::DuplicateTelephoneNumber {
            telephone_number: "555-0100".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("555-0100"));
        assert!(message.contains("John Doe"));
    }

    #[test]
    fn test_database_error_includes_source() {
        let error = AppError::storage("insert repair", anyhow::anyhow!("disk full"));
        assert_eq!(
            error.to_string(),
            "Database operation failed: insert repair: disk full"
        );
    }

    #[test]
    fn test_config_validation_error_conversion() {
        let error: AppError = ConfigError::validation("server.port", "Port must be positive").into();
        match error {
            AppError::Configuration { key, message } => {
                assert_eq!(key, "server.port");
                assert!(message.contains("positive"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }
}
