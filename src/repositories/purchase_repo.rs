//! Purchase repository for async PostgreSQL operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff::Timestamp;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter, Resource};
use crate::models::{
    Customer, NewPurchaseRow, Purchase, PurchaseChangeset, PurchaseDetails, PurchaseRow,
};
use crate::repositories::PurchaseRepository;
use crate::schema::purchases;

#[derive(Clone)]
pub struct PgPurchaseRepository {
    pool: AsyncDbPool,
}

impl PgPurchaseRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PurchaseRepository for PgPurchaseRepository {
    async fn create(&self, customer: &Customer, details: PurchaseDetails) -> AppResult<Purchase> {
        let mut conn = self.pool.get().await?;
        let row = NewPurchaseRow::new(Uuid::new_v4(), customer.id, &details, Timestamp::now());

        diesel::insert_into(purchases::table)
            .values(&row)
            .returning(PurchaseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Purchase::from)
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert purchase"))
    }

    async fn get_all(&self, customer_id: Uuid) -> AppResult<Vec<Purchase>> {
        let mut conn = self.pool.get().await?;

        let rows: Vec<PurchaseRow> = purchases::table
            .filter(purchases::customer_id.eq(customer_id))
            .order((purchases::purchased_at.desc(), purchases::created_at.desc()))
            .select(PurchaseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list purchases"))?;

        Ok(rows.into_iter().map(Purchase::from).collect())
    }

    async fn update(
        &self,
        customer_id: Uuid,
        purchase_id: Uuid,
        details: PurchaseDetails,
    ) -> AppResult<Purchase> {
        let mut conn = self.pool.get().await?;
        let changes = PurchaseChangeset::new(&details, Timestamp::now());

        diesel::update(
            purchases::table
                .filter(purchases::id.eq(purchase_id))
                .filter(purchases::customer_id.eq(customer_id)),
        )
        .set(&changes)
        .returning(PurchaseRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update purchase"))?
        .map(Purchase::from)
        .ok_or_else(|| AppError::not_found(Resource::Purchase, purchase_id))
    }

    async fn delete_by_id(&self, customer_id: Uuid, purchase_id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(
            purchases::table
                .filter(purchases::id.eq(purchase_id))
                .filter(purchases::customer_id.eq(customer_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete purchase"))?;

        if deleted == 0 {
            return Err(AppError::not_found(Resource::Purchase, purchase_id));
        }
        Ok(())
    }
}
