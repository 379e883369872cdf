//! Customer repository for async PostgreSQL operations.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use jiff::Timestamp;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter, Resource};
use crate::models::{
    Customer, CustomerChangeset, CustomerDetails, CustomerFilter, CustomerRow, NewCustomerRow,
    Page,
};
use crate::repositories::CustomerRepository;
use crate::schema::{customers, purchases, repairs};

const TELEPHONE_COLUMN: &str = "telephone_number";

diesel::define_sql_function!(fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text);

/// Customer repository holding an async connection pool.
///
/// `AsyncDbPool` is reference counted, so cloning the repository is cheap.
#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: AsyncDbPool,
}

impl PgCustomerRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Customers matching the name filters, without ordering or paging.
    fn filtered(filter: &CustomerFilter) -> customers::BoxedQuery<'static, Pg> {
        let mut query = customers::table.into_boxed();
        if !filter.first_name.is_empty() {
            query = query.filter(
                customers::first_name.ilike(CustomerFilter::like_pattern(&filter.first_name)),
            );
        }
        if !filter.last_name.is_empty() {
            query = query.filter(
                customers::last_name.ilike(CustomerFilter::like_pattern(&filter.last_name)),
            );
        }
        query
    }
}

/// Turns a telephone uniqueness violation into the domain error and
/// everything else into a storage error.
fn map_write_error(error: DieselError, details: &CustomerDetails, operation: &str) -> AppError {
    match DatabaseErrorConverter::unique_violation(&error) {
        Some(violation) if violation.column == TELEPHONE_COLUMN => {
            tracing::debug!(
                telephone_number = %details.telephone_number,
                "Telephone number already in use"
            );
            AppError::DuplicateTelephoneNumber {
                telephone_number: details.telephone_number.clone(),
                first_name: details.first_name.clone(),
                last_name: details.last_name.clone(),
            }
        }
        _ => DatabaseErrorConverter::convert_diesel_error(error, operation),
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn create(&self, details: CustomerDetails) -> AppResult<Customer> {
        let mut conn = self.pool.get().await?;
        let row = NewCustomerRow::new(Uuid::new_v4(), &details, Timestamp::now());

        diesel::insert_into(customers::table)
            .values(&row)
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Customer::from)
            .map_err(|e| map_write_error(e, &details, "insert customer"))
    }

    async fn list_by(&self, filter: &CustomerFilter) -> AppResult<Page<Customer>> {
        let mut conn = self.pool.get().await?;

        let total: i64 = Self::filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "count customers"))?;

        let rows: Vec<CustomerRow> = Self::filtered(filter)
            .order((
                lower(customers::first_name).asc(),
                customers::first_name.asc(),
                customers::id.asc(),
            ))
            .limit(filter.limit)
            .offset(filter.offset)
            .select(CustomerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list customers"))?;

        Ok(Page {
            items: rows.into_iter().map(Customer::from).collect(),
            total,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Customer> {
        let mut conn = self.pool.get().await?;

        customers::table
            .find(id)
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "get customer"))?
            .map(Customer::from)
            .ok_or_else(|| AppError::not_found(Resource::Customer, id))
    }

    async fn update(&self, id: Uuid, details: CustomerDetails) -> AppResult<Customer> {
        let mut conn = self.pool.get().await?;
        let changes = CustomerChangeset::new(&details, Timestamp::now());

        diesel::update(customers::table.find(id))
            .set(&changes)
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|e| map_write_error(e, &details, "update customer"))?
            .map(Customer::from)
            .ok_or_else(|| AppError::not_found(Resource::Customer, id))
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let purchases_deleted =
                    diesel::delete(purchases::table.filter(purchases::customer_id.eq(id)))
                        .execute(conn)
                        .await
                        .map_err(|e| {
                            DatabaseErrorConverter::convert_diesel_error(
                                e,
                                "delete customer purchases",
                            )
                        })?;

                let repairs_deleted =
                    diesel::delete(repairs::table.filter(repairs::customer_id.eq(id)))
                        .execute(conn)
                        .await
                        .map_err(|e| {
                            DatabaseErrorConverter::convert_diesel_error(
                                e,
                                "delete customer repairs",
                            )
                        })?;

                let deleted = diesel::delete(customers::table.find(id))
                    .execute(conn)
                    .await
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(e, "delete customer")
                    })?;

                if deleted == 0 {
                    return Err(AppError::not_found(Resource::Customer, id));
                }

                tracing::debug!(
                    customer_id = %id,
                    purchases_deleted,
                    repairs_deleted,
                    "Customer deleted"
                );
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}
