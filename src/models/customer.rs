use diesel::prelude::*;
use jiff::Timestamp;
use jiff_diesel::ToDiesel;
use uuid::Uuid;

/// A customer of the shop. Owns its purchases and repairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub telephone_number: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The editable part of a customer, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub telephone_number: String,
}

impl CustomerDetails {
    /// Full name as shown in conflict messages.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Search criteria for listing customers.
///
/// Empty name filters match every customer; matching is a case-insensitive
/// substring test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerFilter {
    pub first_name: String,
    pub last_name: String,
    pub limit: i64,
    pub offset: i64,
}

impl Default for CustomerFilter {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            limit: 10,
            offset: 0,
        }
    }
}

impl CustomerFilter {
    /// Returns true when the customer's names contain both filters.
    pub fn matches(&self, customer: &Customer) -> bool {
        contains_ignore_case(&customer.first_name, &self.first_name)
            && contains_ignore_case(&customer.last_name, &self.last_name)
    }

    /// LIKE pattern for a name filter, with wildcards in the needle escaped.
    pub(crate) fn like_pattern(needle: &str) -> String {
        let escaped = needle
            .to_lowercase()
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomerRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub telephone_number: String,
    pub created_at: jiff_diesel::Timestamp,
    pub updated_at: jiff_diesel::Timestamp,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            telephone_number: row.telephone_number,
            created_at: row.created_at.to_jiff(),
            updated_at: row.updated_at.to_jiff(),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::customers)]
pub(crate) struct NewCustomerRow<'a> {
    pub id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub telephone_number: &'a str,
    pub created_at: jiff_diesel::Timestamp,
    pub updated_at: jiff_diesel::Timestamp,
}

impl<'a> NewCustomerRow<'a> {
    pub fn new(id: Uuid, details: &'a CustomerDetails, now: Timestamp) -> Self {
        Self {
            id,
            first_name: &details.first_name,
            last_name: &details.last_name,
            telephone_number: &details.telephone_number,
            created_at: now.to_diesel(),
            updated_at: now.to_diesel(),
        }
    }
}

/// Only the editable columns; `created_at` is never touched by an update.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
pub(crate) struct CustomerChangeset<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub telephone_number: &'a str,
    pub updated_at: jiff_diesel::Timestamp,
}

impl<'a> CustomerChangeset<'a> {
    pub fn new(details: &'a CustomerDetails, now: Timestamp) -> Self {
        Self {
            first_name: &details.first_name,
            last_name: &details.last_name,
            telephone_number: &details.telephone_number,
            updated_at: now.to_diesel(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(first_name: &str, last_name: &str) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            telephone_number: "555-0100".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = CustomerFilter::default();
        assert!(filter.matches(&customer("Ada", "Lovelace")));
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let filter = CustomerFilter {
            first_name: "DA".to_string(),
            last_name: "love".to_string(),
            ..Default::default()
        };
        assert!(filter.matches(&customer("Ada", "Lovelace")));
        assert!(!filter.matches(&customer("Grace", "Hopper")));
    }

    #[test]
    fn test_both_filters_must_match() {
        let filter = CustomerFilter {
            first_name: "ada".to_string(),
            last_name: "hopper".to_string(),
            ..Default::default()
        };
        assert!(!filter.matches(&customer("Ada", "Lovelace")));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(CustomerFilter::like_pattern("Ann"), "%ann%");
        assert_eq!(CustomerFilter::like_pattern("50%_"), "%50\\%\\_%");
    }

    #[test]
    fn test_full_name() {
        let details = CustomerDetails {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            telephone_number: "123".to_string(),
        };
        assert_eq!(details.full_name(), "John Doe");
    }
}
