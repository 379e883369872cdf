//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod customer_service;
mod purchase_service;
mod repair_service;

pub use customer_service::CustomerService;
pub use purchase_service::PurchaseService;
pub use repair_service::RepairService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since every service only holds `Arc`s.
#[derive(Clone)]
pub struct Services {
    pub customers: CustomerService,
    pub purchases: PurchaseService,
    pub repairs: RepairService,
}

impl Services {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            customers: CustomerService::new(repos.customers.clone()),
            purchases: PurchaseService::new(repos.customers.clone(), repos.purchases.clone()),
            repairs: RepairService::new(repos.customers.clone(), repos.repairs.clone()),
        }
    }
}
