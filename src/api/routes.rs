//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    content_type_middleware, logging_middleware, request_id_middleware,
};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Layers run outermost first:
/// 1. CORS
/// 2. Compression
/// 3. Request ID, so that every later log line carries the id
/// 4. Logging
/// 5. Content-type guard, before any body is read
///
/// # Routes
/// - `/api/customers` and the nested purchase and repair endpoints
/// - `/health`, `/health/ready`, `/health/live`
/// - `/swagger-ui` and `/api-docs/openapi.json`
pub fn create_router(state: AppState) -> Router {
    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::customers::customer_routes())
        .merge(handlers::purchases::purchase_routes())
        .merge(handlers::repairs::repair_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .layer(middleware::from_fn(content_type_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
