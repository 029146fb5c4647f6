//! Budget domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::decimal_utils::validate_amount;
use crate::utils::time_utils::validate_month;

/// Monthly budget of a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    /// `YYYY-MM`
    pub month: String,
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating or replacing the budget of a month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub month: String,
    pub amount: Decimal,
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        validate_month(&self.month)?;
        validate_amount(self.amount, "Budget amount")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpsertResult {
    pub budget: Budget,
    pub created: bool,
}
