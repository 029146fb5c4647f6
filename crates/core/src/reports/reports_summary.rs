//! Builds overview and monthly summaries from loaded rows.

use rust_decimal::Decimal;

use super::reports_model::{
    BudgetUsage, FinancialOverview, MonthlyEvolution, MonthlySummary, OverviewStats,
};
use crate::budgets::Budget;
use crate::constants::MONTHLY_EVOLUTION_WINDOW;
use crate::errors::{Error, Result};
use crate::transactions::{
    compute_totals, expenses_by_category, round_amount, totals_by_month, Transaction,
};
use crate::utils::decimal_utils::{checked_add, checked_div, checked_sub};

/// `spent / amount * 100`, zero for a zero budget.
fn percentage_of(spent: Decimal, amount: Decimal) -> Result<Decimal> {
    if amount.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let ratio = checked_div(spent, amount)?;
    ratio
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(round_amount)
        .ok_or_else(|| Error::Unexpected("Budget percentage overflowed".to_string()))
}

fn sum(mut values: impl Iterator<Item = Decimal>) -> Result<Decimal> {
    values.try_fold(Decimal::ZERO, checked_add)
}

pub fn build_overview(
    transactions: &[Transaction],
    budgets: &[Budget],
) -> Result<FinancialOverview> {
    let totals = compute_totals(transactions)?;
    let by_month = totals_by_month(transactions)?;

    let budget_usage = budgets
        .iter()
        .map(|budget| {
            let spent = by_month
                .get(&budget.month)
                .map(|(_, expenses)| *expenses)
                .unwrap_or(Decimal::ZERO);
            Ok(BudgetUsage {
                month: budget.month.clone(),
                amount: budget.amount,
                spent: round_amount(spent),
                percentage: percentage_of(spent, budget.amount)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let skip = by_month.len().saturating_sub(MONTHLY_EVOLUTION_WINDOW);
    let monthly_evolution: Vec<MonthlyEvolution> = by_month
        .into_iter()
        .skip(skip)
        .map(|(month, (income, expenses))| {
            Ok(MonthlyEvolution {
                month,
                income: round_amount(income),
                expenses: round_amount(expenses),
                balance: round_amount(checked_sub(income, expenses)?),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let months = Decimal::from(monthly_evolution.len());
    let (average_monthly_income, average_monthly_expenses) = if months.is_zero() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let income = sum(monthly_evolution.iter().map(|m| m.income))?;
        let expenses = sum(monthly_evolution.iter().map(|m| m.expenses))?;
        (
            round_amount(checked_div(income, months)?),
            round_amount(checked_div(expenses, months)?),
        )
    };

    Ok(FinancialOverview {
        total_income: totals.total_income,
        total_expenses: totals.total_expenses,
        net_balance: totals.balance,
        expenses_by_category: expenses_by_category(transactions)?,
        budget_usage,
        monthly_evolution,
        stats: OverviewStats {
            transaction_count: transactions.len() as i64,
            average_monthly_income,
            average_monthly_expenses,
        },
    })
}

/// Summary of the transactions of `month`.
pub fn build_monthly_summary(
    month: &str,
    transactions: &[Transaction],
    budget: Option<&Budget>,
) -> Result<MonthlySummary> {
    let totals = compute_totals(transactions)?;
    let budget_amount = budget.map(|b| b.amount).unwrap_or(Decimal::ZERO);
    Ok(MonthlySummary {
        month: month.to_string(),
        total_income: totals.total_income,
        total_expenses: totals.total_expenses,
        net_balance: totals.balance,
        expenses_by_category: expenses_by_category(transactions)?,
        transaction_count: transactions.len() as i64,
        budget_amount,
        budget_used: percentage_of(totals.total_expenses, budget_amount)?,
    })
}
