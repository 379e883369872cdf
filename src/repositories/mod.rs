//! Repository layer for data access operations.
//!
//! Each entity has an async trait with a PostgreSQL implementation backed by
//! diesel-async and an in-memory implementation sharing one locked store.
//! [`Repositories`] picks the implementation from the storage configuration.

mod customer_repo;
mod memory;
mod purchase_repo;
mod repair_repo;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

pub use customer_repo::PgCustomerRepository;
pub use memory::{
    InMemoryCustomerRepository, InMemoryPurchaseRepository, InMemoryRepairRepository, MemoryStore,
};
pub use purchase_repo::PgPurchaseRepository;
pub use repair_repo::PgRepairRepository;

use crate::config::{DatabaseConfig, StorageBackend};
use crate::db::{AsyncDbPool, establish_async_connection_pool};
use crate::error::AppResult;
use crate::models::{
    Customer, CustomerDetails, CustomerFilter, Page, Purchase, PurchaseDetails, Repair,
    RepairDetails,
};

/// Customer storage.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Stores a new customer under a freshly generated id.
    ///
    /// Fails with `DuplicateTelephoneNumber` when the number is taken.
    async fn create(&self, details: CustomerDetails) -> AppResult<Customer>;

    /// Customers whose names contain the filter values, ordered by first
    /// name, with the number of matches before pagination.
    async fn list_by(&self, filter: &CustomerFilter) -> AppResult<Page<Customer>>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Customer>;

    /// Replaces first name, last name and telephone number.
    async fn update(&self, id: Uuid, details: CustomerDetails) -> AppResult<Customer>;

    /// Deletes the customer together with its purchases and repairs.
    async fn delete_by_id(&self, id: Uuid) -> AppResult<()>;
}

/// Purchase storage, always scoped to the owning customer.
#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    async fn create(&self, customer: &Customer, details: PurchaseDetails) -> AppResult<Purchase>;

    /// Newest purchase date first; ties broken by creation time.
    async fn get_all(&self, customer_id: Uuid) -> AppResult<Vec<Purchase>>;

    async fn update(
        &self,
        customer_id: Uuid,
        purchase_id: Uuid,
        details: PurchaseDetails,
    ) -> AppResult<Purchase>;

    async fn delete_by_id(&self, customer_id: Uuid, purchase_id: Uuid) -> AppResult<()>;
}

/// Repair storage, always scoped to the owning customer.
#[async_trait]
pub trait RepairRepository: Send + Sync {
    async fn create(&self, customer: &Customer, details: RepairDetails) -> AppResult<Repair>;

    /// Most recently created first.
    async fn get_all(&self, customer_id: Uuid) -> AppResult<Vec<Repair>>;

    async fn delete_by_id(&self, customer_id: Uuid, repair_id: Uuid) -> AppResult<()>;
}

#[derive(Clone)]
enum Storage {
    Postgres(AsyncDbPool),
    Memory,
}

/// Aggregates all repositories for convenient access.
///
/// Cloning is cheap: every field is reference counted.
#[derive(Clone)]
pub struct Repositories {
    pub customers: Arc<dyn CustomerRepository>,
    pub purchases: Arc<dyn PurchaseRepository>,
    pub repairs: Arc<dyn RepairRepository>,
    storage: Storage,
}

impl Repositories {
    /// Repositories backed by PostgreSQL through the given pool.
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            customers: Arc::new(PgCustomerRepository::new(pool.clone())),
            purchases: Arc::new(PgPurchaseRepository::new(pool.clone())),
            repairs: Arc::new(PgRepairRepository::new(pool.clone())),
            storage: Storage::Postgres(pool),
        }
    }

    /// Repositories sharing one fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            customers: Arc::new(InMemoryCustomerRepository::new(store.clone())),
            purchases: Arc::new(InMemoryPurchaseRepository::new(store.clone())),
            repairs: Arc::new(InMemoryRepairRepository::new(store)),
            storage: Storage::Memory,
        }
    }

    /// Builds the repositories for the configured backend.
    ///
    /// For postgres this establishes the connection pool.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            StorageBackend::Postgres => {
                let pool = establish_async_connection_pool(config).await?;
                Ok(Self::postgres(pool))
            }
            StorageBackend::Memory => Ok(Self::in_memory()),
        }
    }

    pub fn backend(&self) -> StorageBackend {
        match self.storage {
            Storage::Postgres(_) => StorageBackend::Postgres,
            Storage::Memory => StorageBackend::Memory,
        }
    }

    /// Checks that the storage answers; the in-memory store always does.
    pub async fn ping(&self) -> AppResult<()> {
        match &self.storage {
            Storage::Postgres(pool) => crate::db::ping(pool).await,
            Storage::Memory => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_config_memory_backend() {
        let config = DatabaseConfig {
            backend: StorageBackend::Memory,
            ..Default::default()
        };
        let repos = Repositories::from_config(&config).await.unwrap();
        assert_eq!(repos.backend(), StorageBackend::Memory);
        assert!(repos.ping().await.is_ok());
    }
}
