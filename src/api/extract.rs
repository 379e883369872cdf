//! Extractors that report failures as [`AppError`].

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// JSON request body where an empty body counts as `{}`.
///
/// The content type is checked by the content-type middleware, so this
/// extractor only reads and parses the bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(body)
            .map(JsonBody)
            .map_err(|e| AppError::bad_request(e.to_string()))
    }
}

/// Query string extractor whose rejection is a 400 `{"detail": ...}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(QueryParams(value))
    }
}

/// `{customer_id}` of the customer routes.
///
/// Path extractors run before the body is read, so a malformed id is
/// reported even when the body is malformed too.
#[derive(Debug, Clone, Copy)]
pub struct CustomerId(pub Uuid);

/// `{customer_id}` and `{purchase_id}`.
#[derive(Debug, Clone, Copy)]
pub struct PurchaseIds(pub Uuid, pub Uuid);

/// `{customer_id}` and `{repair_id}`.
#[derive(Debug, Clone, Copy)]
pub struct RepairIds(pub Uuid, pub Uuid);

async fn path_segments<S: Send + Sync>(
    parts: &mut Parts,
    state: &S,
) -> AppResult<HashMap<String, String>> {
    let Path(segments) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    Ok(segments)
}

fn segment(
    segments: &HashMap<String, String>,
    key: &str,
    param: &'static str,
) -> AppResult<Uuid> {
    parse_uuid(param, segments.get(key).map(String::as_str).unwrap_or_default())
}

impl<S: Send + Sync> FromRequestParts<S> for CustomerId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let segments = path_segments(parts, state).await?;
        Ok(CustomerId(segment(&segments, "customer_id", "customer id")?))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for PurchaseIds {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let segments = path_segments(parts, state).await?;
        Ok(PurchaseIds(
            segment(&segments, "customer_id", "customer id")?,
            segment(&segments, "purchase_id", "purchase id")?,
        ))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RepairIds {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let segments = path_segments(parts, state).await?;
        Ok(RepairIds(
            segment(&segments, "customer_id", "customer id")?,
            segment(&segments, "repair_id", "repair id")?,
        ))
    }
}

/// Parses a path segment as a UUID, naming the parameter on failure.
fn parse_uuid(param: &'static str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::MalformedIdentifier {
        param,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        name: Option<String>,
        #[serde(default)]
        limit: i64,
    }

    fn post(body: &'static str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/probe")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_body_parses_object() {
        let JsonBody(probe) = JsonBody::<Probe>::from_request(post(r#"{"name":"x"}"#), &())
            .await
            .unwrap();
        assert_eq!(probe.name.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_empty_body_is_empty_object() {
        let JsonBody(probe) = JsonBody::<Probe>::from_request(post(""), &()).await.unwrap();
        assert_eq!(probe, Probe { name: None, limit: 0 });
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let err = JsonBody::<Probe>::from_request(post("{not json"), &())
            .await
            .unwrap_err();
        match err {
            AppError::BadRequest { message } => assert!(!message.is_empty()),
            other => panic!("Expected BadRequest error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_query_type_mismatch_is_bad_request() {
        let request = Request::builder()
            .uri("/probe?limit=ten")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let err = QueryParams::<Probe>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[test]
    fn test_parse_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid("customer id", &id.to_string()).unwrap(), id);

        let err = parse_uuid("repair id", "42").unwrap_err();
        assert_eq!(err.to_string(), "given repair id '42' is not a valid UUID");
    }
}
