//! Customer CRUD request handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CUSTOMER_TAG;
use crate::api::dto::{
    CustomerListQuery, CustomerRequest, CustomerResponse, ErrorResponse, PagedResponse,
};
use crate::api::extract::{CustomerId, JsonBody, QueryParams};
use crate::error::AppResult;
use crate::state::AppState;

/// Routes:
/// - GET    /api/customers
/// - POST   /api/customers
/// - GET    /api/customers/{customer_id}
/// - PUT    /api/customers/{customer_id}
/// - DELETE /api/customers/{customer_id}
pub fn customer_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_customers, create_customer))
        .routes(routes!(get_customer, update_customer, delete_customer))
}

/// List customers
///
/// Filters by case-insensitive substrings of the first and last name and
/// orders by first name.
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = CUSTOMER_TAG,
    params(CustomerListQuery),
    responses(
        (status = 200, description = "Page of customers", body = PagedResponse<CustomerResponse>),
        (status = 400, description = "Invalid query parameters")
    )
)]
async fn list_customers(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CustomerListQuery>,
) -> AppResult<Json<PagedResponse<CustomerResponse>>> {
    let filter = state.validator.list_query(query)?;
    let page = state.services.customers.list_customers(&filter).await?;

    let data = page.items.into_iter().map(CustomerResponse::from).collect();
    Ok(Json(PagedResponse::new(data, page.total)))
}

/// Create a customer
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = CUSTOMER_TAG,
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Invalid payload or telephone number already in use", body = ErrorResponse)
    )
)]
async fn create_customer(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CustomerRequest>,
) -> AppResult<(StatusCode, Json<CustomerResponse>)> {
    let details = state.validator.customer(payload)?;
    let customer = state.services.customers.create_customer(details).await?;
    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

/// Fetch one customer
#[utoipa::path(
    get,
    path = "/api/customers/{customer_id}",
    tag = CUSTOMER_TAG,
    params(("customer_id" = String, Path, description = "Customer UUID")),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 400, description = "Malformed customer id", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
async fn get_customer(
    State(state): State<AppState>,
    CustomerId(id): CustomerId,
) -> AppResult<Json<CustomerResponse>> {
    let customer = state.services.customers.get_customer(id).await?;
    Ok(Json(CustomerResponse::from(customer)))
}

/// Edit a customer
///
/// Replaces the first name, last name and telephone number.
#[utoipa::path(
    put,
    path = "/api/customers/{customer_id}",
    tag = CUSTOMER_TAG,
    params(("customer_id" = String, Path, description = "Customer UUID")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResponse),
        (status = 400, description = "Invalid payload or telephone number already in use", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
async fn update_customer(
    State(state): State<AppState>,
    CustomerId(id): CustomerId,
    JsonBody(payload): JsonBody<CustomerRequest>,
) -> AppResult<Json<CustomerResponse>> {
    let details = state.validator.customer(payload)?;
    let customer = state.services.customers.update_customer(id, details).await?;
    Ok(Json(CustomerResponse::from(customer)))
}

/// Delete a customer with all purchases and repairs
#[utoipa::path(
    delete,
    path = "/api/customers/{customer_id}",
    tag = CUSTOMER_TAG,
    params(("customer_id" = String, Path, description = "Customer UUID")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 400, description = "Malformed customer id", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
async fn delete_customer(
    State(state): State<AppState>,
    CustomerId(id): CustomerId,
) -> AppResult<StatusCode> {
    state.services.customers.delete_customer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
