//! Report domain models.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_REPORT_YEAR, MIN_REPORT_YEAR};
use crate::errors::{Error, Result};

/// Figures of a single month, stored with the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: String,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: Decimal,
    pub expenses_by_category: BTreeMap<String, Decimal>,
    pub transaction_count: i64,
    /// Zero when the month has no budget
    pub budget_amount: Decimal,
    /// Percentage of the budget spent
    pub budget_used: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub user_id: String,
    pub month: String,
    pub report_url: String,
    pub summary: MonthlySummary,
    pub generated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReportRecord {
    pub month: String,
    pub report_url: String,
    pub summary: MonthlySummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReport {
    pub month: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportListQuery {
    pub year: Option<String>,
}

impl ReportListQuery {
    pub fn year(&self) -> Result<Option<i32>> {
        let Some(raw) = self.year.as_deref().map(str::trim).filter(|y| !y.is_empty()) else {
            return Ok(None);
        };
        match raw.parse::<i32>() {
            Ok(year) if (MIN_REPORT_YEAR..=MAX_REPORT_YEAR).contains(&year) => Ok(Some(year)),
            _ => Err(Error::invalid_input(format!(
                "Year must be an integer between {} and {}",
                MIN_REPORT_YEAR, MAX_REPORT_YEAR
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportList {
    pub reports: Vec<Report>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUsage {
    pub month: String,
    pub amount: Decimal,
    pub spent: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEvolution {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub transaction_count: i64,
    pub average_monthly_income: Decimal,
    pub average_monthly_expenses: Decimal,
}

/// All-time figures shown on the reports page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialOverview {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: Decimal,
    pub expenses_by_category: BTreeMap<String, Decimal>,
    pub budget_usage: Vec<BudgetUsage>,
    pub monthly_evolution: Vec<MonthlyEvolution>,
    pub stats: OverviewStats,
}
