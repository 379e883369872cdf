//! Middleware components for request processing.
//!
//! This module contains middleware for logging, request ID tracking,
//! content-type enforcement, and the error-to-response mapping.

mod content_type;
mod error_handler;
mod logging;
mod request_id;

pub use content_type::content_type_middleware;
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
