//! Helpers shared by the SQLite repositories.

use std::str::FromStr;

use budgetwise_core::errors::{DatabaseError, Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Character used to escape `%` and `_` in LIKE patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Decimals are stored as text to keep exact values.
pub fn parse_decimal(value: &str, field: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        Error::Database(DatabaseError::Internal(format!(
            "Stored {} '{}' is not a decimal: {}",
            field, value, e
        )))
    })
}

pub fn parse_stored_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        Error::Database(DatabaseError::Internal(format!(
            "Stored date '{}' is invalid: {}",
            value, e
        )))
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `%needle%` with LIKE wildcards in the needle escaped.
pub fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
