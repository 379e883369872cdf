//! Customer request and response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Customer;

/// Body of `POST /api/customers` and `PUT /api/customers/{customer_id}`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CustomerRequest {
    #[validate(required, length(min = 1, code = "required"))]
    #[schema(example = "John")]
    pub first_name: Option<String>,

    #[validate(required, length(min = 1, code = "required"))]
    #[schema(example = "Doe")]
    pub last_name: Option<String>,

    #[validate(required, length(min = 1, code = "required"))]
    #[schema(example = "+48 600 100 200")]
    pub telephone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub telephone_number: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: String,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            telephone_number: customer.telephone_number,
            created_at: customer.created_at.to_string(),
            updated_at: customer.updated_at.to_string(),
        }
    }
}
