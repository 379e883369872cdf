//! Data Transfer Objects for API requests and responses.
//!
//! Request types keep every field optional so that a missing field is
//! reported by [`RequestValidator`](crate::validation::RequestValidator)
//! together with all other violations instead of failing JSON parsing.

mod customer;
mod error;
mod health;
mod pagination;
mod purchase;
mod repair;

pub use customer::{CustomerRequest, CustomerResponse};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use pagination::{CustomerListQuery, PagedResponse};
pub use purchase::{PurchaseRequest, PurchaseResponse};
pub use repair::{CostInput, RepairRequest, RepairResponse};
