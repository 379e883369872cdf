//! Error handler for converting AppError to HTTP responses.
//!
//! This is the only place where an error is given a status code.

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::DuplicateTelephoneNumber { .. }
            | AppError::Validation { .. }
            | AppError::MalformedIdentifier { .. }
            | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database { .. }
            | AppError::Configuration { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    /// # Status Code Mapping
    /// - NotFound → 404
    /// - DuplicateTelephoneNumber, Validation, MalformedIdentifier, BadRequest → 400
    /// - ConnectionPool → 503
    /// - Database, Configuration, Internal → 500
    ///
    /// Validation errors return the per-field map as the body; everything
    /// else returns `{"detail": <message>}`.
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(
                status = status.as_u16(),
                error = %self,
                source = ?std::error::Error::source(&self),
                "Request failed"
            );
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        match self {
            AppError::Validation { errors } => (status, Json(errors)).into_response(),
            other => (status, Json(ErrorResponse::new(other.to_string()))).into_response(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}
