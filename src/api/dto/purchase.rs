use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Purchase;

/// Body of the purchase create and update endpoints.
///
/// `purchased_at` is a `YYYY-MM-DD` date; an RFC 3339 timestamp is accepted
/// too and reduced to its calendar date in UTC.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PurchaseRequest {
    #[validate(required, length(min = 1, code = "required"))]
    #[schema(example = "Ray-Ban RB5154")]
    pub frame_model: Option<String>,

    #[validate(required, length(min = 1, code = "required"))]
    #[schema(example = "progressive")]
    pub lens_type: Option<String>,

    #[validate(required, length(min = 1, code = "required"))]
    #[schema(example = "-1.25")]
    pub lens_power: Option<String>,

    #[validate(required, length(min = 1, code = "required"))]
    #[schema(example = "62")]
    pub pd: Option<String>,

    #[validate(required, length(min = 1, code = "required"))]
    #[schema(example = "glasses")]
    pub purchase_type: Option<String>,

    #[validate(required, length(min = 1, code = "required"))]
    #[schema(format = Date, example = "2024-03-01")]
    pub purchased_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurchaseResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub frame_model: String,
    pub lens_type: String,
    pub lens_power: String,
    pub pd: String,
    pub purchase_type: String,
    #[schema(value_type = String, format = Date)]
    pub purchased_at: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: String,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: String,
}

impl From<Purchase> for PurchaseResponse {
    fn from(purchase: Purchase) -> Self {
        Self {
            id: purchase.id,
            customer_id: purchase.customer_id,
            frame_model: purchase.frame_model,
            lens_type: purchase.lens_type,
            lens_power: purchase.lens_power,
            pd: purchase.pd,
            purchase_type: purchase.purchase_type,
            purchased_at: purchase.purchased_at.to_string(),
            created_at: purchase.created_at.to_string(),
            updated_at: purchase.updated_at.to_string(),
        }
    }
}
