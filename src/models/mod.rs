//! Domain entities and their Diesel row mappings.
//!
//! Domain types carry `jiff` values; the `*Row` types are the storage shape
//! used by the Postgres repositories.

mod customer;
mod purchase;
mod repair;

pub use customer::{Customer, CustomerDetails, CustomerFilter};
pub use purchase::{Purchase, PurchaseDetails};
pub use repair::{Repair, RepairDetails};

pub(crate) use customer::{CustomerChangeset, CustomerRow, NewCustomerRow};
pub(crate) use purchase::{NewPurchaseRow, PurchaseChangeset, PurchaseRow};
pub(crate) use repair::{NewRepairRow, RepairRow};

/// A page of results together with the number of rows matching the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}
