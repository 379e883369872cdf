//! Rejects write requests whose body is not declared as JSON.

use axum::{
    extract::Request,
    http::{Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

const ALLOWED: &str = "application/json";

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|essence| essence.eq_ignore_ascii_case(ALLOWED))
}

/// Requires `Content-Type: application/json` on POST, PUT and PATCH.
///
/// Media type parameters such as `charset` are accepted.
pub async fn content_type_middleware(request: Request, next: Next) -> Response {
    if !matches!(*request.method(), Method::POST | Method::PUT | Method::PATCH) {
        return next.run(request).await;
    }

    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_default();

    if is_json(&content_type) {
        return next.run(request).await;
    }

    AppError::bad_request(format!(
        "invalid content-type header specified: '{}', allowed: '{}'",
        content_type, ALLOWED
    ))
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_json() {
        assert!(is_json("application/json"));
        assert!(is_json("Application/JSON; charset=utf-8"));
        assert!(!is_json("text/plain"));
        assert!(!is_json("application/jsonx"));
        assert!(!is_json(""));
    }
}
