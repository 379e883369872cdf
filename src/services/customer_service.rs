//! Customer service for business logic operations.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Customer, CustomerDetails, CustomerFilter, Page};
use crate::repositories::CustomerRepository;

/// Customer operations on top of whichever repository backend is configured.
#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_customer(&self, details: CustomerDetails) -> AppResult<Customer> {
        let customer = self.repo.create(details).await?;
        tracing::info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Filtered page of customers plus the total number of matches.
    pub async fn list_customers(&self, filter: &CustomerFilter) -> AppResult<Page<Customer>> {
        self.repo.list_by(filter).await
    }

    pub async fn get_customer(&self, id: Uuid) -> AppResult<Customer> {
        self.repo.get_by_id(id).await
    }

    pub async fn update_customer(&self, id: Uuid, details: CustomerDetails) -> AppResult<Customer> {
        let customer = self.repo.update(id, details).await?;
        tracing::info!(customer_id = %id, "Customer updated");
        Ok(customer)
    }

    /// Deletes the customer with all purchases and repairs it owns.
    pub async fn delete_customer(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete_by_id(id).await?;
        tracing::info!(customer_id = %id, "Customer deleted");
        Ok(())
    }
}
