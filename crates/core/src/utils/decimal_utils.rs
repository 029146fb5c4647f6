use rust_decimal::Decimal;

use crate::constants::{AMOUNT_SCALE, MAX_AMOUNT};
use crate::errors::{Error, Result};

/// Checks that a money amount lies in `0..=MAX_AMOUNT` with at most two
/// decimal places. Trailing zeros do not count as decimal places.
pub fn validate_amount(amount: Decimal, label: &str) -> Result<Decimal> {
    if amount.is_sign_negative() {
        return Err(Error::invalid_input(format!(
            "{} must be zero or positive",
            label
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(Error::invalid_input(format!(
            "{} must be at most {}",
            label, MAX_AMOUNT
        )));
    }
    let normalized = amount.normalize();
    if normalized.scale() > AMOUNT_SCALE {
        return Err(Error::invalid_input(format!(
            "{} must have at most {} decimal places",
            label, AMOUNT_SCALE
        )));
    }
    Ok(normalized)
}

pub fn checked_add(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| Error::Unexpected("Amount total overflowed".to_string()))
}

pub fn checked_sub(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_sub(b)
        .ok_or_else(|| Error::Unexpected("Amount difference overflowed".to_string()))
}

pub fn checked_div(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_div(b)
        .ok_or_else(|| Error::Unexpected("Amount division overflowed".to_string()))
}
