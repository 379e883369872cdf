//! Lenient parsing of dates and decimal amounts sent as JSON.

use std::str::FromStr;
use std::sync::LazyLock;

use bigdecimal::BigDecimal;
use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;

use regex::Regex;

use crate::api::dto::CostInput;

/// Upper bound (exclusive) of a `NUMERIC(10,2)` column.
const MAX_COST: i64 = 100_000_000;

/// Longest cost text that is parsed at all.
const MAX_COST_TEXT: usize = 32;

/// Plain decimal notation only; exponents would be expanded before rounding.
static PLAIN_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("static pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostError {
    /// Not a number, or a negative one
    Invalid,
    /// Does not fit the storage column
    TooLarge,
}

/// Parses `YYYY-MM-DD`, falling back to the UTC calendar date of an
/// RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    Date::strptime("%Y-%m-%d", raw).ok().or_else(|| {
        raw.parse::<Timestamp>()
            .ok()
            .map(|ts| ts.to_zoned(TimeZone::UTC).date())
    })
}

/// Converts a cost to a non-negative decimal rounded to cents.
pub fn parse_cost(input: &CostInput) -> Result<BigDecimal, CostError> {
    let parsed = match input {
        CostInput::Number(number) if !number.is_finite() || *number < 0.0 => {
            return Err(CostError::Invalid);
        }
        CostInput::Number(number) if *number >= MAX_COST as f64 => return Err(CostError::TooLarge),
        CostInput::Number(number) => BigDecimal::from_str(&format!("{:.6}", number)),
        CostInput::Text(text) => {
            let text = text.trim();
            if text.len() > MAX_COST_TEXT || !PLAIN_DECIMAL.is_match(text) {
                return Err(CostError::Invalid);
            }
            BigDecimal::from_str(text)
        }
    };
    let value = parsed.map_err(|_| CostError::Invalid)?;

    if value < BigDecimal::from(0) {
        return Err(CostError::Invalid);
    }
    let value = value.round(2);
    if value >= BigDecimal::from(MAX_COST) {
        return Err(CostError::TooLarge);
    }
    Ok(value)
}
