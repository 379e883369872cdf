use diesel::prelude::*;
use jiff::Timestamp;
use jiff::civil::Date;
use jiff_diesel::ToDiesel;
use uuid::Uuid;

/// A pair of glasses sold to a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub frame_model: String,
    pub lens_type: String,
    pub lens_power: String,
    pub pd: String,
    pub purchase_type: String,
    pub purchased_at: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields supplied by the client when creating or replacing a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseDetails {
    pub frame_model: String,
    pub lens_type: String,
    pub lens_power: String,
    pub pd: String,
    pub purchase_type: String,
    pub purchased_at: Date,
}

impl Purchase {
    pub(crate) fn apply(&mut self, details: PurchaseDetails, now: Timestamp) {
        self.frame_model = details.frame_model;
        self.lens_type = details.lens_type;
        self.lens_power = details.lens_power;
        self.pd = details.pd;
        self.purchase_type = details.purchase_type;
        self.purchased_at = details.purchased_at;
        self.updated_at = now;
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::schema::purchases)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PurchaseRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub frame_model: String,
    pub lens_type: String,
    pub lens_power: String,
    pub pd: String,
    pub purchase_type: String,
    pub purchased_at: jiff_diesel::Date,
    pub created_at: jiff_diesel::Timestamp,
    pub updated_at: jiff_diesel::Timestamp,
}

impl From<PurchaseRow> for Purchase {
    fn from(row: PurchaseRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            frame_model: row.frame_model,
            lens_type: row.lens_type,
            lens_power: row.lens_power,
            pd: row.pd,
            purchase_type: row.purchase_type,
            purchased_at: row.purchased_at.to_jiff(),
            created_at: row.created_at.to_jiff(),
            updated_at: row.updated_at.to_jiff(),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::purchases)]
pub(crate) struct NewPurchaseRow<'a> {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub frame_model: &'a str,
    pub lens_type: &'a str,
    pub lens_power: &'a str,
    pub pd: &'a str,
    pub purchase_type: &'a str,
    pub purchased_at: jiff_diesel::Date,
    pub created_at: jiff_diesel::Timestamp,
    pub updated_at: jiff_diesel::Timestamp,
}

impl<'a> NewPurchaseRow<'a> {
    pub fn new(id: Uuid, customer_id: Uuid, details: &'a PurchaseDetails, now: Timestamp) -> Self {
        Self {
            id,
            customer_id,
            frame_model: &details.frame_model,
            lens_type: &details.lens_type,
            lens_power: &details.lens_power,
            pd: &details.pd,
            purchase_type: &details.purchase_type,
            purchased_at: details.purchased_at.to_diesel(),
            created_at: now.to_diesel(),
            updated_at: now.to_diesel(),
        }
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::purchases)]
pub(crate) struct PurchaseChangeset<'a> {
    pub frame_model: &'a str,
    pub lens_type: &'a str,
    pub lens_power: &'a str,
    pub pd: &'a str,
    pub purchase_type: &'a str,
    pub purchased_at: jiff_diesel::Date,
    pub updated_at: jiff_diesel::Timestamp,
}

impl<'a> PurchaseChangeset<'a> {
    pub fn new(details: &'a PurchaseDetails, now: Timestamp) -> Self {
        Self {
            frame_model: &details.frame_model,
            lens_type: &details.lens_type,
            lens_power: &details.lens_power,
            pd: &details.pd,
            purchase_type: &details.purchase_type,
            purchased_at: details.purchased_at.to_diesel(),
            updated_at: now.to_diesel(),
        }
    }
}
