//! Repair handlers nested under a customer.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::REPAIR_TAG;
use crate::api::dto::{ErrorResponse, RepairRequest, RepairResponse};
use crate::api::extract::{CustomerId, JsonBody, RepairIds};
use crate::error::AppResult;
use crate::state::AppState;

pub fn repair_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_repairs, create_repair))
        .routes(routes!(delete_repair))
}

/// List a customer's repairs, most recent first
#[utoipa::path(
    get,
    path = "/api/customers/{customer_id}/repairs",
    tag = REPAIR_TAG,
    params(("customer_id" = String, Path, description = "Customer UUID")),
    responses(
        (status = 200, description = "Repairs of the customer", body = Vec<RepairResponse>),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
async fn list_repairs(
    State(state): State<AppState>,
    CustomerId(customer_id): CustomerId,
) -> AppResult<Json<Vec<RepairResponse>>> {
    let repairs = state.services.repairs.list_repairs(customer_id).await?;
    Ok(Json(repairs.into_iter().map(RepairResponse::from).collect()))
}

/// Report a repair for a customer
///
/// `cost` may be a JSON number or a numeric string.
#[utoipa::path(
    post,
    path = "/api/customers/{customer_id}/repairs",
    tag = REPAIR_TAG,
    params(("customer_id" = String, Path, description = "Customer UUID")),
    request_body = RepairRequest,
    responses(
        (status = 201, description = "Repair created", body = RepairResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
async fn create_repair(
    State(state): State<AppState>,
    CustomerId(customer_id): CustomerId,
    JsonBody(payload): JsonBody<RepairRequest>,
) -> AppResult<(StatusCode, Json<RepairResponse>)> {
    let details = state.validator.repair(payload)?;
    let repair = state.services.repairs.create_repair(customer_id, details).await?;
    Ok((StatusCode::CREATED, Json(RepairResponse::from(repair))))
}

/// Delete a repair
#[utoipa::path(
    delete,
    path = "/api/customers/{customer_id}/repairs/{repair_id}",
    tag = REPAIR_TAG,
    params(
        ("customer_id" = String, Path, description = "Customer UUID"),
        ("repair_id" = String, Path, description = "Repair UUID")
    ),
    responses(
        (status = 204, description = "Repair deleted"),
        (status = 404, description = "Customer or repair not found", body = ErrorResponse)
    )
)]
async fn delete_repair(
    State(state): State<AppState>,
    RepairIds(customer_id, repair_id): RepairIds,
) -> AppResult<StatusCode> {
    state
        .services
        .repairs
        .delete_repair(customer_id, repair_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
