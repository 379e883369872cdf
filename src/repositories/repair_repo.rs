//! Repair repository for async PostgreSQL operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff::Timestamp;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter, Resource};
use crate::models::{Customer, NewRepairRow, Repair, RepairDetails, RepairRow};
use crate::repositories::RepairRepository;
use crate::schema::repairs;

#[derive(Clone)]
pub struct PgRepairRepository {
    pool: AsyncDbPool,
}

impl PgRepairRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RepairRepository for PgRepairRepository {
    async fn create(&self, customer: &Customer, details: RepairDetails) -> AppResult<Repair> {
        let mut conn = self.pool.get().await?;
        let row = NewRepairRow::new(Uuid::new_v4(), customer.id, &details, Timestamp::now());

        diesel::insert_into(repairs::table)
            .values(&row)
            .returning(RepairRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Repair::from)
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert repair"))
    }

    async fn get_all(&self, customer_id: Uuid) -> AppResult<Vec<Repair>> {
        let mut conn = self.pool.get().await?;

        let rows: Vec<RepairRow> = repairs::table
            .filter(repairs::customer_id.eq(customer_id))
            .order(repairs::created_at.desc())
            .select(RepairRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list repairs"))?;

        Ok(rows.into_iter().map(Repair::from).collect())
    }

    async fn delete_by_id(&self, customer_id: Uuid, repair_id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(
            repairs::table
                .filter(repairs::id.eq(repair_id))
                .filter(repairs::customer_id.eq(customer_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete repair"))?;

        if deleted == 0 {
            return Err(AppError::not_found(Resource::Repair, repair_id));
        }
        Ok(())
    }
}
