use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::Transaction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub recent_transactions: Vec<Transaction>,
    /// All-time income minus expenses
    pub balance: Decimal,
    /// `YYYY-MM` the monthly figures refer to
    pub month: String,
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub monthly_budget: Option<Decimal>,
    pub remaining_budget: Decimal,
}
