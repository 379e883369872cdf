use bigdecimal::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Repair;

/// Repair cost as sent by clients: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CostInput {
    Number(f64),
    Text(String),
}

impl CostInput {
    pub fn is_blank(&self) -> bool {
        matches!(self, CostInput::Text(text) if text.trim().is_empty())
    }
}

/// Body of `POST /api/customers/{customer_id}/repairs`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct RepairRequest {
    #[validate(required, length(min = 1, code = "required"))]
    #[schema(example = "Loose hinge on the left temple")]
    pub description: Option<String>,

    #[validate(required)]
    #[schema(example = 12.5)]
    pub cost: Option<CostInput>,

    #[validate(required, length(min = 1, code = "required"))]
    #[schema(format = Date, example = "2024-03-01")]
    pub reported_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepairResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub description: String,
    #[schema(example = 12.5)]
    pub cost: f64,
    #[schema(value_type = String, format = Date)]
    pub reported_at: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: String,
}

impl From<Repair> for RepairResponse {
    fn from(repair: Repair) -> Self {
        Self {
            id: repair.id,
            customer_id: repair.customer_id,
            description: repair.description,
            // NUMERIC(10,2) always fits in an f64
            cost: repair.cost.to_f64().unwrap_or_default(),
            reported_at: repair.reported_at.to_string(),
            created_at: repair.created_at.to_string(),
        }
    }
}
