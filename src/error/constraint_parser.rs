use std::sync::OnceLock;

use regex::Regex;

/// Structured view of a PostgreSQL unique or foreign key violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub table: String,
    pub column: String,
    pub value: String,
}

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// PostgreSQL reports the offending key in the DETAIL part of the error
/// (`Key (column)=(value) already exists.`) and names the constraint
/// `<table>_<column>_key` / `<table>_<column>_fkey` by default.
pub struct ConstraintParser;

struct RegexPatterns {
    key_value: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("static pattern"),
            table_name: Regex::new(r#"table "([^"]+)""#).expect("static pattern"),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique constraint violation.
    ///
    /// `details` is the DETAIL line PostgreSQL attaches to the error; some
    /// drivers fold it into `message` instead, so both are searched.
    ///
    /// # Examples
    /// ```
    /// use customer_manager::error::ConstraintParser;
    ///
    /// let violation = ConstraintParser::parse_unique_violation(
    ///     "duplicate key value violates unique constraint \"customers_telephone_number_key\"",
    ///     Some("Key (telephone_number)=(555-0100) already exists."),
    ///     Some("customers_telephone_number_key"),
    /// )
    /// .unwrap();
    /// assert_eq!(violation.table, "customers");
    /// assert_eq!(violation.column, "telephone_number");
    /// assert_eq!(violation.value, "555-0100");
    /// ```
    pub fn parse_unique_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<ConstraintViolation> {
        Self::parse_violation(message, details, constraint_name, "_key")
    }

    /// Parses a foreign key violation, e.g. a purchase pointing at a
    /// customer that no longer exists.
    pub fn parse_foreign_key_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<ConstraintViolation> {
        Self::parse_violation(message, details, constraint_name, "_fkey")
    }

    fn parse_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
        suffix: &str,
    ) -> Option<ConstraintViolation> {
        let key_value = details
            .and_then(Self::extract_key_value)
            .or_else(|| Self::extract_key_value(message));

        match (key_value, constraint_name) {
            (Some((column, value)), Some(constraint)) => {
                let table = Self::table_from_constraint(constraint, &column, suffix)
                    .or_else(|| Self::extract_table(message))
                    .unwrap_or_else(|| "resource".to_string());
                Some(ConstraintViolation {
                    table,
                    column,
                    value,
                })
            }
            (Some((column, value)), None) => Some(ConstraintViolation {
                table: Self::extract_table(message).unwrap_or_else(|| "resource".to_string()),
                column,
                value,
            }),
            (None, Some(constraint)) => {
                let (table, column) = Self::parse_constraint_name(constraint, suffix)?;
                Some(ConstraintViolation {
                    table,
                    column,
                    value: String::new(),
                })
            }
            (None, None) => None,
        }
    }

    /// Strips `_<column><suffix>` from a constraint name to recover the table.
    fn table_from_constraint(constraint: &str, column: &str, suffix: &str) -> Option<String> {
        constraint
            .strip_suffix(suffix)?
            .strip_suffix(column)?
            .strip_suffix('_')
            .map(str::to_string)
    }

    /// Splits `<table>_<column><suffix>` when the column is not known.
    ///
    /// The table is taken to be the first segment, so multi-word table names
    /// are not recovered here.
    pub fn parse_constraint_name(constraint: &str, suffix: &str) -> Option<(String, String)> {
        let stem = constraint.strip_suffix(suffix)?;
        let (table, column) = stem.split_once('_')?;
        if table.is_empty() || column.is_empty() {
            return None;
        }
        Some((table.to_string(), column.to_string()))
    }

    /// Extracts `(column, value)` from `Key (column)=(value)`.
    pub fn extract_key_value(text: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(text).and_then(|caps| {
            let column = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((column, value))
        })
    }

    /// Extracts the table name from `on table "name"`.
    pub fn extract_table(text: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIQUE_MESSAGE: &str =
        "duplicate key value violates unique constraint \"customers_telephone_number_key\"";
    const UNIQUE_DETAILS: &str = "Key (telephone_number)=(555-0100) already exists.";

    #[test]
    fn test_parse_unique_violation_from_details() {
        let result = ConstraintParser::parse_unique_violation(
            UNIQUE_MESSAGE,
            Some(UNIQUE_DETAILS),
            Some("customers_telephone_number_key"),
        );
        assert_eq!(
            result,
            Some(ConstraintViolation {
                table: "customers".to_string(),
                column: "telephone_number".to_string(),
                value: "555-0100".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_unique_violation_with_detail_in_message() {
        let message = format!("{}\nDETAIL: {}", UNIQUE_MESSAGE, UNIQUE_DETAILS);
        let result = ConstraintParser::parse_unique_violation(
            &message,
            None,
            Some("customers_telephone_number_key"),
        )
        .unwrap();
        assert_eq!(result.column, "telephone_number");
        assert_eq!(result.value, "555-0100");
    }

    #[test]
    fn test_parse_unique_violation_without_constraint_name() {
        let result =
            ConstraintParser::parse_unique_violation(UNIQUE_MESSAGE, Some(UNIQUE_DETAILS), None)
                .unwrap();
        assert_eq!(result.table, "resource");
        assert_eq!(result.column, "telephone_number");
    }

    #[test]
    fn test_parse_unique_violation_constraint_name_only() {
        let result = ConstraintParser::parse_unique_violation(
            "duplicate key",
            None,
            Some("customers_telephone_number_key"),
        )
        .unwrap();
        assert_eq!(result.table, "customers");
        assert_eq!(result.column, "telephone_number");
        assert_eq!(result.value, "");
    }

    #[test]
    fn test_parse_foreign_key_violation() {
        let message = "insert or update on table \"purchases\" violates foreign key constraint \"purchases_customer_id_fkey\"";
        let details = "Key (customer_id)=(8c1f0e7a-2b9d-4b7e-9a61-3f1f2f9b1c11) is not present in table \"customers\".";
        let result = ConstraintParser::parse_foreign_key_violation(
            message,
            Some(details),
            Some("purchases_customer_id_fkey"),
        )
        .unwrap();
        assert_eq!(result.table, "purchases");
        assert_eq!(result.column, "customer_id");
        assert_eq!(result.value, "8c1f0e7a-2b9d-4b7e-9a61-3f1f2f9b1c11");
    }

    #[test]
    fn test_parse_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("customers_telephone_number_key", "_key"),
            Some(("customers".to_string(), "telephone_number".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("repairs_customer_id_fkey", "_fkey"),
            Some(("repairs".to_string(), "customer_id".to_string()))
        );
        assert_eq!(ConstraintParser::parse_constraint_name("invalid", "_key"), None);
    }

    #[test]
    fn test_extract_table() {
        let message = "insert or update on table \"repairs\" violates foreign key constraint";
        assert_eq!(
            ConstraintParser::extract_table(message),
            Some("repairs".to_string())
        );
        assert_eq!(ConstraintParser::extract_table("no table here"), None);
    }

    #[test]
    fn test_graceful_parsing_failures() {
        assert_eq!(
            ConstraintParser::parse_unique_violation("something odd", None, None),
            None
        );
        assert_eq!(ConstraintParser::extract_key_value("Key without parens"), None);
    }
}
