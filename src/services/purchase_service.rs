//! Purchase service; every operation is scoped to an existing customer.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Purchase, PurchaseDetails};
use crate::repositories::{CustomerRepository, PurchaseRepository};

#[derive(Clone)]
pub struct PurchaseService {
    customers: Arc<dyn CustomerRepository>,
    purchases: Arc<dyn PurchaseRepository>,
}

impl PurchaseService {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        purchases: Arc<dyn PurchaseRepository>,
    ) -> Self {
        Self {
            customers,
            purchases,
        }
    }

    /// Fails with customer `NotFound` before anything is written.
    pub async fn create_purchase(
        &self,
        customer_id: Uuid,
        details: PurchaseDetails,
    ) -> AppResult<Purchase> {
        let customer = self.customers.get_by_id(customer_id).await?;
        let purchase = self.purchases.create(&customer, details).await?;
        tracing::info!(customer_id = %customer_id, purchase_id = %purchase.id, "Purchase created");
        Ok(purchase)
    }

    pub async fn list_purchases(&self, customer_id: Uuid) -> AppResult<Vec<Purchase>> {
        let customer = self.customers.get_by_id(customer_id).await?;
        self.purchases.get_all(customer.id).await
    }

    pub async fn update_purchase(
        &self,
        customer_id: Uuid,
        purchase_id: Uuid,
        details: PurchaseDetails,
    ) -> AppResult<Purchase> {
        let customer = self.customers.get_by_id(customer_id).await?;
        self.purchases.update(customer.id, purchase_id, details).await
    }

    pub async fn delete_purchase(&self, customer_id: Uuid, purchase_id: Uuid) -> AppResult<()> {
        let customer = self.customers.get_by_id(customer_id).await?;
        self.purchases.delete_by_id(customer.id, purchase_id).await?;
        tracing::info!(customer_id = %customer_id, purchase_id = %purchase_id, "Purchase deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Resource};
    use crate::repositories::Repositories;
    use jiff::civil::date;

    fn details() -> PurchaseDetails {
        PurchaseDetails {
            frame_model: "Model1".to_string(),
            lens_type: "single vision".to_string(),
            lens_power: "+0.5".to_string(),
            pd: "60".to_string(),
            purchase_type: "glasses".to_string(),
            purchased_at: date(2023, 6, 1),
        }
    }

    #[tokio::test]
    async fn test_missing_customer_blocks_create() {
        let repos = Repositories::in_memory();
        let service = PurchaseService::new(repos.customers.clone(), repos.purchases.clone());
        let customer_id = Uuid::new_v4();

        let err = service.create_purchase(customer_id, details()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { resource: Resource::Customer, .. }));
        assert!(repos.purchases.get_all(customer_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_for_missing_customer_is_not_found() {
        let repos = Repositories::in_memory();
        let service = PurchaseService::new(repos.customers, repos.purchases);
        assert!(matches!(
            service.list_purchases(Uuid::new_v4()).await,
            Err(AppError::NotFound { resource: Resource::Customer, .. })
        ));
    }
}
