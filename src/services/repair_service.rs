//! Repair service; every operation is scoped to an existing customer.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Repair, RepairDetails};
use crate::repositories::{CustomerRepository, RepairRepository};

#[derive(Clone)]
pub struct RepairService {
    customers: Arc<dyn CustomerRepository>,
    repairs: Arc<dyn RepairRepository>,
}

impl RepairService {
    pub fn new(customers: Arc<dyn CustomerRepository>, repairs: Arc<dyn RepairRepository>) -> Self {
        Self { customers, repairs }
    }

    pub async fn create_repair(&self, customer_id: Uuid, details: RepairDetails) -> AppResult<Repair> {
        let customer = self.customers.get_by_id(customer_id).await?;
        let repair = self.repairs.create(&customer, details).await?;
        tracing::info!(customer_id = %customer_id, repair_id = %repair.id, "Repair created");
        Ok(repair)
    }

    pub async fn list_repairs(&self, customer_id: Uuid) -> AppResult<Vec<Repair>> {
        let customer = self.customers.get_by_id(customer_id).await?;
        self.repairs.get_all(customer.id).await
    }

    pub async fn delete_repair(&self, customer_id: Uuid, repair_id: Uuid) -> AppResult<()> {
        let customer = self.customers.get_by_id(customer_id).await?;
        self.repairs.delete_by_id(customer.id, repair_id).await?;
        tracing::info!(customer_id = %customer_id, repair_id = %repair_id, "Repair deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Resource};
    use crate::models::CustomerDetails;
    use crate::repositories::Repositories;
    use bigdecimal::BigDecimal;
    use jiff::civil::date;

    #[tokio::test]
    async fn test_create_and_list_repairs() {
        let repos = Repositories::in_memory();
        let customer = repos
            .customers
            .create(CustomerDetails {
                first_name: "Jane".to_string(),
                last_name: "Roe".to_string(),
                telephone_number: "789".to_string(),
            })
            .await
            .unwrap();
        let service = RepairService::new(repos.customers, repos.repairs);

        let repair = service
            .create_repair(
                customer.id,
                RepairDetails {
                    description: "scratched lens".to_string(),
                    cost: BigDecimal::from(20),
                    reported_at: date(2024, 1, 10),
                },
            )
            .await
            .unwrap();
        assert_eq!(repair.customer_id, customer.id);
        assert_eq!(service.list_repairs(customer.id).await.unwrap(), vec![repair]);
    }

    #[tokio::test]
    async fn test_delete_for_missing_customer_is_not_found() {
        let repos = Repositories::in_memory();
        let service = RepairService::new(repos.customers, repos.repairs);
        let err = service
            .delete_repair(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { resource: Resource::Customer, .. }));
    }
}
