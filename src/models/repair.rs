use bigdecimal::BigDecimal;
use diesel::prelude::*;
use jiff::Timestamp;
use jiff::civil::Date;
use jiff_diesel::ToDiesel;
use uuid::Uuid;

/// A repair job reported by a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Repair {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub description: String,
    pub cost: BigDecimal,
    pub reported_at: Date,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepairDetails {
    pub description: String,
    pub cost: BigDecimal,
    pub reported_at: Date,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::schema::repairs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RepairRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub description: String,
    pub cost: BigDecimal,
    pub reported_at: jiff_diesel::Date,
    pub created_at: jiff_diesel::Timestamp,
}

impl From<RepairRow> for Repair {
    fn from(row: RepairRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            description: row.description,
            cost: row.cost,
            reported_at: row.reported_at.to_jiff(),
            created_at: row.created_at.to_jiff(),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::repairs)]
pub(crate) struct NewRepairRow<'a> {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub description: &'a str,
    pub cost: &'a BigDecimal,
    pub reported_at: jiff_diesel::Date,
    pub created_at: jiff_diesel::Timestamp,
}

impl<'a> NewRepairRow<'a> {
    pub fn new(id: Uuid, customer_id: Uuid, details: &'a RepairDetails, now: Timestamp) -> Self {
        Self {
            id,
            customer_id,
            description: &details.description,
            cost: &details.cost,
            reported_at: details.reported_at.to_diesel(),
            created_at: now.to_diesel(),
        }
    }
}
