use utoipa::OpenApi;

pub const CUSTOMER_TAG: &str = "Customers";
pub const PURCHASE_TAG: &str = "Purchases";
pub const REPAIR_TAG: &str = "Repairs";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "customer-manager",
        description = "Back-office API for customers, their glasses purchases and repairs",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::CostInput,
        )
    ),
    tags(
        (name = CUSTOMER_TAG, description = "Customer management endpoints"),
        (name = PURCHASE_TAG, description = "Purchases recorded for a customer"),
        (name = REPAIR_TAG, description = "Repairs reported by a customer"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
