//! In-memory repositories for development and tests.
//!
//! All three repositories share one [`MemoryStore`]; every operation takes
//! the store lock once, so the cascading delete and the telephone uniqueness
//! check are atomic with respect to other requests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use jiff::Timestamp;
use uuid::Uuid;

use crate::error::{AppError, AppResult, Resource};
use crate::models::{
    Customer, CustomerDetails, CustomerFilter, Page, Purchase, PurchaseDetails, Repair,
    RepairDetails,
};
use crate::repositories::{CustomerRepository, PurchaseRepository, RepairRepository};

#[derive(Debug, Default)]
struct StoreData {
    customers: HashMap<Uuid, Customer>,
    // Kept in insertion order so equal timestamps still list newest first.
    purchases: Vec<Purchase>,
    repairs: Vec<Repair>,
}

impl StoreData {
    fn telephone_taken(&self, telephone_number: &str, except: Option<Uuid>) -> bool {
        self.customers
            .values()
            .any(|c| c.telephone_number == telephone_number && Some(c.id) != except)
    }

    fn ensure_customer(&self, customer_id: Uuid, operation: &str, table: &str) -> AppResult<()> {
        if self.customers.contains_key(&customer_id) {
            return Ok(());
        }
        Err(AppError::storage(
            operation,
            anyhow!(
                "Foreign key constraint violation: {}.customer_id references missing value '{}'",
                table,
                customer_id
            ),
        ))
    }
}

fn duplicate(details: &CustomerDetails) -> AppError {
    AppError::DuplicateTelephoneNumber {
        telephone_number: details.telephone_number.clone(),
        first_name: details.first_name.clone(),
        last_name: details.last_name.clone(),
    }
}

/// Shared process-local storage for customers, purchases and repairs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<StoreData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, StoreData>> {
        self.data
            .read()
            .map_err(|e| AppError::storage("acquire read lock", anyhow!("{}", e)))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, StoreData>> {
        self.data
            .write()
            .map_err(|e| AppError::storage("acquire write lock", anyhow!("{}", e)))
    }
}

#[derive(Clone)]
pub struct InMemoryCustomerRepository {
    store: MemoryStore,
}

impl InMemoryCustomerRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn create(&self, details: CustomerDetails) -> AppResult<Customer> {
        let mut data = self.store.write()?;
        if data.telephone_taken(&details.telephone_number, None) {
            return Err(duplicate(&details));
        }

        let now = Timestamp::now();
        let customer = Customer {
            id: Uuid::new_v4(),
            first_name: details.first_name,
            last_name: details.last_name,
            telephone_number: details.telephone_number,
            created_at: now,
            updated_at: now,
        };
        data.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn list_by(&self, filter: &CustomerFilter) -> AppResult<Page<Customer>> {
        let data = self.store.read()?;

        let mut matching: Vec<&Customer> = data
            .customers
            .values()
            .filter(|customer| filter.matches(customer))
            .collect();
        matching.sort_by_cached_key(|c| (c.first_name.to_lowercase(), c.first_name.clone(), c.id));

        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(filter.offset).unwrap_or(0))
            .take(usize::try_from(filter.limit).unwrap_or(0))
            .cloned()
            .collect();

        Ok(Page { items, total })
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Customer> {
        self.store
            .read()?
            .customers
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(Resource::Customer, id))
    }

    async fn update(&self, id: Uuid, details: CustomerDetails) -> AppResult<Customer> {
        let mut data = self.store.write()?;
        if !data.customers.contains_key(&id) {
            return Err(AppError::not_found(Resource::Customer, id));
        }
        if data.telephone_taken(&details.telephone_number, Some(id)) {
            return Err(duplicate(&details));
        }

        let customer = data
            .customers
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(Resource::Customer, id))?;
        customer.first_name = details.first_name;
        customer.last_name = details.last_name;
        customer.telephone_number = details.telephone_number;
        customer.updated_at = Timestamp::now();
        Ok(customer.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        let mut data = self.store.write()?;
        if data.customers.remove(&id).is_none() {
            return Err(AppError::not_found(Resource::Customer, id));
        }
        data.purchases.retain(|p| p.customer_id != id);
        data.repairs.retain(|r| r.customer_id != id);
        Ok(())
    }
}

#[derive(Clone)]
pub struct InMemoryPurchaseRepository {
    store: MemoryStore,
}

impl InMemoryPurchaseRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PurchaseRepository for InMemoryPurchaseRepository {
    async fn create(&self, customer: &Customer, details: PurchaseDetails) -> AppResult<Purchase> {
        let mut data = self.store.write()?;
        data.ensure_customer(customer.id, "insert purchase", "purchases")?;

        let now = Timestamp::now();
        let purchase = Purchase {
            id: Uuid::new_v4(),
            customer_id: customer.id,
            frame_model: details.frame_model,
            lens_type: details.lens_type,
            lens_power: details.lens_power,
            pd: details.pd,
            purchase_type: details.purchase_type,
            purchased_at: details.purchased_at,
            created_at: now,
            updated_at: now,
        };
        data.purchases.push(purchase.clone());
        Ok(purchase)
    }

    async fn get_all(&self, customer_id: Uuid) -> AppResult<Vec<Purchase>> {
        let data = self.store.read()?;
        let mut purchases: Vec<Purchase> = data
            .purchases
            .iter()
            .rev()
            .filter(|p| p.customer_id == customer_id)
            .cloned()
            .collect();
        purchases.sort_by(|a, b| {
            b.purchased_at
                .cmp(&a.purchased_at)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(purchases)
    }

    async fn update(
        &self,
        customer_id: Uuid,
        purchase_id: Uuid,
        details: PurchaseDetails,
    ) -> AppResult<Purchase> {
        let mut data = self.store.write()?;
        let purchase = data
            .purchases
            .iter_mut()
            .find(|p| p.id == purchase_id && p.customer_id == customer_id)
            .ok_or_else(|| AppError::not_found(Resource::Purchase, purchase_id))?;
        purchase.apply(details, Timestamp::now());
        Ok(purchase.clone())
    }

    async fn delete_by_id(&self, customer_id: Uuid, purchase_id: Uuid) -> AppResult<()> {
        let mut data = self.store.write()?;
        let before = data.purchases.len();
        data.purchases
            .retain(|p| !(p.id == purchase_id && p.customer_id == customer_id));
        if data.purchases.len() == before {
            return Err(AppError::not_found(Resource::Purchase, purchase_id));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct InMemoryRepairRepository {
    store: MemoryStore,
}

impl InMemoryRepairRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RepairRepository for InMemoryRepairRepository {
    async fn create(&self, customer: &Customer, details: RepairDetails) -> AppResult<Repair> {
        let mut data = self.store.write()?;
        data.ensure_customer(customer.id, "insert repair", "repairs")?;

        let repair = Repair {
            id: Uuid::new_v4(),
            customer_id: customer.id,
            description: details.description,
            cost: details.cost,
            reported_at: details.reported_at,
            created_at: Timestamp::now(),
        };
        data.repairs.push(repair.clone());
        Ok(repair)
    }

    async fn get_all(&self, customer_id: Uuid) -> AppResult<Vec<Repair>> {
        let data = self.store.read()?;
        let mut repairs: Vec<Repair> = data
            .repairs
            .iter()
            .rev()
            .filter(|r| r.customer_id == customer_id)
            .cloned()
            .collect();
        repairs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(repairs)
    }

    async fn delete_by_id(&self, customer_id: Uuid, repair_id: Uuid) -> AppResult<()> {
        let mut data = self.store.write()?;
        let before = data.repairs.len();
        data.repairs
            .retain(|r| !(r.id == repair_id && r.customer_id == customer_id));
        if data.repairs.len() == before {
            return Err(AppError::not_found(Resource::Repair, repair_id));
        }
        Ok(())
    }
}
