use chrono::{Datelike, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::{Error, Result};

lazy_static! {
    /// `YYYY-MM` with a month between 01 and 12
    static ref MONTH_PATTERN: Regex =
        Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])$").expect("Invalid regex pattern");
}

/// Format used for transaction dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns true when `month` is a `YYYY-MM` key.
pub fn is_valid_month(month: &str) -> bool {
    MONTH_PATTERN.is_match(month)
}

pub fn validate_month(month: &str) -> Result<()> {
    if is_valid_month(month) {
        Ok(())
    } else {
        Err(Error::invalid_input("Month must be in YYYY-MM format"))
    }
}

/// Returns the first and last day of a `YYYY-MM` month.
pub fn month_bounds(month: &str) -> Result<(NaiveDate, NaiveDate)> {
    validate_month(month)?;
    let first = NaiveDate::parse_from_str(&format!("{month}-01"), DATE_FORMAT)?;
    let (next_year, next_month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| Error::invalid_input(format!("Month {month} is out of range")))?;
    Ok((first, last))
}

/// `YYYY-MM` key of the month containing `date`.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| Error::invalid_input(format!("Invalid date '{value}', expected YYYY-MM-DD")))
}

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
