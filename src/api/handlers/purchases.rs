//! Purchase handlers nested under a customer.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::PURCHASE_TAG;
use crate::api::dto::{ErrorResponse, PurchaseRequest, PurchaseResponse};
use crate::api::extract::{CustomerId, JsonBody, PurchaseIds};
use crate::error::AppResult;
use crate::state::AppState;

pub fn purchase_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_purchases, create_purchase))
        .routes(routes!(update_purchase, delete_purchase))
}

/// List a customer's purchases, newest purchase date first
#[utoipa::path(
    get,
    path = "/api/customers/{customer_id}/purchases",
    tag = PURCHASE_TAG,
    params(("customer_id" = String, Path, description = "Customer UUID")),
    responses(
        (status = 200, description = "Purchases of the customer", body = Vec<PurchaseResponse>),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
async fn list_purchases(
    State(state): State<AppState>,
    CustomerId(customer_id): CustomerId,
) -> AppResult<Json<Vec<PurchaseResponse>>> {
    let purchases = state.services.purchases.list_purchases(customer_id).await?;
    Ok(Json(purchases.into_iter().map(PurchaseResponse::from).collect()))
}

/// Record a purchase for a customer
#[utoipa::path(
    post,
    path = "/api/customers/{customer_id}/purchases",
    tag = PURCHASE_TAG,
    params(("customer_id" = String, Path, description = "Customer UUID")),
    request_body = PurchaseRequest,
    responses(
        (status = 201, description = "Purchase created", body = PurchaseResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
async fn create_purchase(
    State(state): State<AppState>,
    CustomerId(customer_id): CustomerId,
    JsonBody(payload): JsonBody<PurchaseRequest>,
) -> AppResult<(StatusCode, Json<PurchaseResponse>)> {
    let details = state.validator.purchase(payload)?;
    let purchase = state
        .services
        .purchases
        .create_purchase(customer_id, details)
        .await?;
    Ok((StatusCode::CREATED, Json(PurchaseResponse::from(purchase))))
}

/// Replace a purchase
#[utoipa::path(
    put,
    path = "/api/customers/{customer_id}/purchases/{purchase_id}",
    tag = PURCHASE_TAG,
    params(
        ("customer_id" = String, Path, description = "Customer UUID"),
        ("purchase_id" = String, Path, description = "Purchase UUID")
    ),
    request_body = PurchaseRequest,
    responses(
        (status = 200, description = "Purchase updated", body = PurchaseResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Customer or purchase not found", body = ErrorResponse)
    )
)]
async fn update_purchase(
    State(state): State<AppState>,
    PurchaseIds(customer_id, purchase_id): PurchaseIds,
    JsonBody(payload): JsonBody<PurchaseRequest>,
) -> AppResult<Json<PurchaseResponse>> {
    let details = state.validator.purchase(payload)?;
    let purchase = state
        .services
        .purchases
        .update_purchase(customer_id, purchase_id, details)
        .await?;
    Ok(Json(PurchaseResponse::from(purchase)))
}

/// Delete a purchase
#[utoipa::path(
    delete,
    path = "/api/customers/{customer_id}/purchases/{purchase_id}",
    tag = PURCHASE_TAG,
    params(
        ("customer_id" = String, Path, description = "Customer UUID"),
        ("purchase_id" = String, Path, description = "Purchase UUID")
    ),
    responses(
        (status = 204, description = "Purchase deleted"),
        (status = 404, description = "Customer or purchase not found", body = ErrorResponse)
    )
)]
async fn delete_purchase(
    State(state): State<AppState>,
    PurchaseIds(customer_id, purchase_id): PurchaseIds,
) -> AppResult<StatusCode> {
    state
        .services
        .purchases
        .delete_purchase(customer_id, purchase_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
