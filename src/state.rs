//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::repositories::Repositories;
use crate::services::Services;
use crate::validation::RequestValidator;

/// Application state shared by every handler.
///
/// Cloning is cheap: services and repositories only hold `Arc`s and the
/// validator is a unit value.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Request payload validation
    pub validator: RequestValidator,
    /// Direct storage access for health probes
    pub repositories: Repositories,
}

impl AppState {
    pub fn new(repositories: Repositories) -> Self {
        Self {
            services: Services::new(&repositories),
            validator: RequestValidator::new(),
            repositories,
        }
    }

    /// State over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Repositories::in_memory())
    }
}
