use std::sync::Arc;

use chrono::NaiveDate;

use super::dashboard_model::DashboardSummary;
use crate::budgets::BudgetRepositoryTrait;
use crate::constants::RECENT_TRANSACTIONS_LIMIT;
use crate::errors::Result;
use crate::transactions::{compute_totals, round_amount, TransactionRepositoryTrait};
use crate::utils::decimal_utils::checked_sub;
use crate::utils::time_utils::{month_bounds, month_key};

pub trait DashboardServiceTrait: Send + Sync {
    /// Summary for the month containing `today`.
    fn get_summary(&self, user_id: &str, today: NaiveDate) -> Result<DashboardSummary>;
}

pub struct DashboardService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
}

impl DashboardService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
    ) -> Self {
        Self {
            transaction_repository,
            budget_repository,
        }
    }
}

impl DashboardServiceTrait for DashboardService {
    fn get_summary(&self, user_id: &str, today: NaiveDate) -> Result<DashboardSummary> {
        let month = month_key(today);
        let (start, end) = month_bounds(&month)?;

        let recent_transactions = self
            .transaction_repository
            .list_recent(user_id, RECENT_TRANSACTIONS_LIMIT)?;
        let all_time = compute_totals(&self.transaction_repository.list_for_user(user_id)?)?;
        let this_month =
            compute_totals(&self.transaction_repository.list_between(user_id, start, end)?)?;
        let monthly_budget = self
            .budget_repository
            .find_by_month(user_id, &month)?
            .map(|b| b.amount);
        let remaining_budget = round_amount(checked_sub(
            monthly_budget.unwrap_or_default(),
            this_month.total_expenses,
        )?);

        Ok(DashboardSummary {
            recent_transactions,
            balance: all_time.balance,
            month,
            monthly_income: this_month.total_income,
            monthly_expenses: this_month.total_expenses,
            monthly_budget,
            remaining_budget,
        })
    }
}
