//! Error types for the logger

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A logger setting holds a value the subscriber cannot use
    #[error("Invalid logger setting '{field}': {message}")]
    Invalid { field: &'static str, message: String },

    /// A global subscriber has already been installed
    #[error("Logger initialization failed: {0}")]
    Init(String),
}

impl LoggerError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}
