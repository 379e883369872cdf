//! Customer list query and paged response.

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query parameters of `GET /api/customers`.
#[derive(Debug, Clone, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct CustomerListQuery {
    /// Case-insensitive substring of the first name
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,

    /// Case-insensitive substring of the last name
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,

    /// Maximum number of customers to return
    #[serde(default = "default_limit", deserialize_with = "limit_or_default")]
    #[validate(range(min = 1, max = 100, message = "The 'limit' must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub limit: i64,

    /// Number of matching customers to skip
    #[serde(default, deserialize_with = "offset_or_default")]
    #[validate(range(min = 0, message = "The 'offset' must not be negative"))]
    #[param(minimum = 0, example = 0)]
    pub offset: i64,
}

impl Default for CustomerListQuery {
    fn default() -> Self {
        Self {
            first_name: None,
            last_name: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

fn default_limit() -> i64 {
    10
}

fn limit_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    number_or(deserializer, default_limit())
}

fn offset_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    number_or(deserializer, 0)
}

/// Query values arrive as text; `limit=` with nothing after it keeps the default.
fn number_or<'de, D: Deserializer<'de>>(deserializer: D, fallback: i64) -> Result<i64, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(fallback),
        Some(raw) if raw.trim().is_empty() => Ok(fallback),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected an integer, got '{}'", raw))),
    }
}

/// A page of items with the number of matches before pagination.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    #[schema(example = 42)]
    pub total: i64,
}

impl<T> PagedResponse<T> {
    pub fn new(data: Vec<T>, total: i64) -> Self {
        Self { data, total }
    }
}
