//! Validation of inbound request payloads.
//!
//! [`RequestValidator`] runs the `validator` derive rules of a request DTO,
//! then coerces dates and amounts, collecting every violation into one
//! [`FieldErrors`] map before anything reaches a repository.

mod coerce;

pub use coerce::{CostError, parse_cost, parse_date};

use validator::Validate;

use crate::api::dto::{CustomerListQuery, CustomerRequest, PurchaseRequest, RepairRequest};
use crate::error::{AppResult, FieldErrors};
use crate::models::{CustomerDetails, CustomerFilter, PurchaseDetails, RepairDetails};

/// Turns request DTOs into domain values or a per-field error map.
///
/// The validator holds no state; one instance is built at startup and kept
/// in the application state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestValidator;

impl RequestValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn customer(&self, request: CustomerRequest) -> AppResult<CustomerDetails> {
        check(structural(&request))?;

        Ok(CustomerDetails {
            first_name: request.first_name.unwrap_or_default(),
            last_name: request.last_name.unwrap_or_default(),
            telephone_number: request.telephone_number.unwrap_or_default(),
        })
    }

    pub fn purchase(&self, request: PurchaseRequest) -> AppResult<PurchaseDetails> {
        let mut errors = structural(&request);
        let purchased_at = date_field(&mut errors, "purchased_at", request.purchased_at.as_deref());
        check(errors)?;

        match purchased_at {
            Some(purchased_at) => Ok(PurchaseDetails {
                frame_model: request.frame_model.unwrap_or_default(),
                lens_type: request.lens_type.unwrap_or_default(),
                lens_power: request.lens_power.unwrap_or_default(),
                pd: request.pd.unwrap_or_default(),
                purchase_type: request.purchase_type.unwrap_or_default(),
                purchased_at,
            }),
            None => Err(required("purchased_at")),
        }
    }

    pub fn repair(&self, request: RepairRequest) -> AppResult<RepairDetails> {
        let mut errors = structural(&request);
        let reported_at = date_field(&mut errors, "reported_at", request.reported_at.as_deref());

        let cost = match request.cost.as_ref() {
            Some(input) if input.is_blank() => {
                errors.add_required("cost");
                None
            }
            Some(input) => match parse_cost(input) {
                Ok(cost) => Some(cost),
                Err(CostError::Invalid) => {
                    errors.add("cost", "number", "The 'cost' must be a non-negative number");
                    None
                }
                Err(CostError::TooLarge) => {
                    errors.add("cost", "range", "The 'cost' must be less than 100000000");
                    None
                }
            },
            None => None,
        };
        check(errors)?;

        match (cost, reported_at) {
            (Some(cost), Some(reported_at)) => Ok(RepairDetails {
                description: request.description.unwrap_or_default(),
                cost,
                reported_at,
            }),
            (None, _) => Err(required("cost")),
            (_, None) => Err(required("reported_at")),
        }
    }

    pub fn list_query(&self, query: CustomerListQuery) -> AppResult<CustomerFilter> {
        check(structural(&query))?;

        Ok(CustomerFilter {
            first_name: query.first_name.unwrap_or_default(),
            last_name: query.last_name.unwrap_or_default(),
            limit: query.limit,
            offset: query.offset,
        })
    }
}

fn structural<T: Validate>(value: &T) -> FieldErrors {
    match value.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => FieldErrors::from(errors),
    }
}

fn check(errors: FieldErrors) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.into())
    }
}

fn required(field: &str) -> crate::error::AppError {
    let mut errors = FieldErrors::new();
    errors.add_required(field);
    errors.into()
}

/// Parses a date field that passed the required check; empty or missing
/// values are already reported by the derive rules.
fn date_field(
    errors: &mut FieldErrors,
    field: &str,
    raw: Option<&str>,
) -> Option<jiff::civil::Date> {
    let raw = raw.filter(|raw| !raw.is_empty())?;
    let parsed = parse_date(raw);
    if parsed.is_none() {
        errors.add(
            field,
            "date",
            format!("The '{}' must be a date in YYYY-MM-DD format", field),
        );
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::CostInput;
    use crate::error::AppError;
    use bigdecimal::BigDecimal;
    use jiff::civil::date;
    use std::str::FromStr;

    fn field_errors(result: AppError) -> FieldErrors {
        match result {
            AppError::Validation { errors } => errors,
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    fn purchase_request() -> PurchaseRequest {
        PurchaseRequest {
            frame_model: Some("Model1".to_string()),
            lens_type: Some("progressive".to_string()),
            lens_power: Some("-1.0".to_string()),
            pd: Some("62".to_string()),
            purchase_type: Some("glasses".to_string()),
            purchased_at: Some("2024-03-01".to_string()),
        }
    }

    #[test]
    fn test_customer_valid() {
        let details = RequestValidator::new()
            .customer(CustomerRequest {
                first_name: Some("John".to_string()),
                last_name: Some("Doe".to_string()),
                telephone_number: Some("123".to_string()),
            })
            .unwrap();
        assert_eq!(details.full_name(), "John Doe");
    }

    #[test]
    fn test_customer_collects_every_missing_field() {
        let errors = field_errors(
            RequestValidator::new()
                .customer(CustomerRequest {
                    first_name: Some(String::new()),
                    ..Default::default()
                })
                .unwrap_err(),
        );
        assert_eq!(errors.len(), 3);
        for field in ["first_name", "last_name", "telephone_number"] {
            assert_eq!(
                errors.get(field).and_then(|rules| rules.get("required")),
                Some(&format!("The '{}' is required", field))
            );
        }
    }

    #[test]
    fn test_purchase_valid() {
        let details = RequestValidator::new().purchase(purchase_request()).unwrap();
        assert_eq!(details.purchased_at, date(2024, 3, 1));
        assert_eq!(details.pd, "62");
    }

    #[test]
    fn test_purchase_bad_date_reported_with_missing_fields() {
        let request = PurchaseRequest {
            frame_model: None,
            purchased_at: Some("tomorrow".to_string()),
            ..purchase_request()
        };
        let errors = field_errors(RequestValidator::new().purchase(request).unwrap_err());
        assert_eq!(errors.len(), 2);
        assert!(errors.get("frame_model").unwrap().contains_key("required"));
        assert_eq!(
            errors.get("purchased_at").and_then(|rules| rules.get("date")),
            Some(&"The 'purchased_at' must be a date in YYYY-MM-DD format".to_string())
        );
    }

    #[test]
    fn test_purchase_missing_date_is_required_only() {
        let request = PurchaseRequest {
            purchased_at: None,
            ..purchase_request()
        };
        let errors = field_errors(RequestValidator::new().purchase(request).unwrap_err());
        let rules = errors.get("purchased_at").unwrap();
        assert!(rules.contains_key("required"));
        assert!(!rules.contains_key("date"));
    }

    #[test]
    fn test_repair_coerces_text_cost() {
        let details = RequestValidator::new()
            .repair(RepairRequest {
                description: Some("hinge".to_string()),
                cost: Some(CostInput::Text("1.50".to_string())),
                reported_at: Some("2024-03-01T10:00:00Z".to_string()),
            })
            .unwrap();
        assert_eq!(details.cost, BigDecimal::from_str("1.5").unwrap());
        assert_eq!(details.reported_at, date(2024, 3, 1));
    }

    #[test]
    fn test_repair_empty_body() {
        let errors = field_errors(
            RequestValidator::new()
                .repair(RepairRequest::default())
                .unwrap_err(),
        );
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["cost", "description", "reported_at"]
        );
    }

    #[test]
    fn test_repair_negative_cost() {
        let errors = field_errors(
            RequestValidator::new()
                .repair(RepairRequest {
                    description: Some("hinge".to_string()),
                    cost: Some(CostInput::Number(-3.0)),
                    reported_at: Some("2024-03-01".to_string()),
                })
                .unwrap_err(),
        );
        assert_eq!(
            errors.get("cost").and_then(|rules| rules.get("number")),
            Some(&"The 'cost' must be a non-negative number".to_string())
        );
    }

    #[test]
    fn test_repair_blank_text_cost_is_required() {
        let errors = field_errors(
            RequestValidator::new()
                .repair(RepairRequest {
                    description: Some("hinge".to_string()),
                    cost: Some(CostInput::Text(String::new())),
                    reported_at: Some("2024-03-01".to_string()),
                })
                .unwrap_err(),
        );
        assert!(errors.get("cost").unwrap().contains_key("required"));
    }

    #[test]
    fn test_list_query_defaults_and_limits() {
        let validator = RequestValidator::new();
        let filter = validator.list_query(CustomerListQuery::default()).unwrap();
        assert_eq!(filter, CustomerFilter::default());

        let errors = field_errors(
            validator
                .list_query(CustomerListQuery {
                    limit: 0,
                    offset: -1,
                    ..Default::default()
                })
                .unwrap_err(),
        );
        assert!(errors.contains("limit"));
        assert!(errors.contains("offset"));
    }
}
