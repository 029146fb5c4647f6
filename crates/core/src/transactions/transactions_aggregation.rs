//! In-memory sums over transactions already loaded from storage.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::transactions_model::{Transaction, TransactionStats, TransactionType};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::Result;
use crate::utils::decimal_utils::{checked_add, checked_sub};
use crate::utils::time_utils::month_key;

/// Rounds an amount for display.
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp(DISPLAY_DECIMAL_PRECISION)
}

/// Income, expenses and their difference.
pub fn compute_totals<'a, I>(transactions: I) -> Result<TransactionStats>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (mut income, mut expenses) = (Decimal::ZERO, Decimal::ZERO);
    for t in transactions {
        match t.transaction_type {
            TransactionType::Income => income = checked_add(income, t.amount)?,
            TransactionType::Expense => expenses = checked_add(expenses, t.amount)?,
        }
    }
    Ok(TransactionStats {
        total_income: round_amount(income),
        total_expenses: round_amount(expenses),
        balance: round_amount(checked_sub(income, expenses)?),
    })
}

/// Expense totals keyed by category. Uncategorized expenses are skipped.
pub fn expenses_by_category<'a, I>(transactions: I) -> Result<BTreeMap<String, Decimal>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in transactions {
        if t.transaction_type != TransactionType::Expense {
            continue;
        }
        if let Some(category) = &t.category {
            let total = totals.entry(category.clone()).or_insert(Decimal::ZERO);
            *total = checked_add(*total, t.amount)?;
        }
    }
    totals.values_mut().for_each(|v| *v = round_amount(*v));
    Ok(totals)
}

/// Income and expense totals per `YYYY-MM`, in ascending month order.
pub fn totals_by_month<'a, I>(transactions: I) -> Result<BTreeMap<String, (Decimal, Decimal)>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut months: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let entry = months
            .entry(month_key(t.date))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.transaction_type {
            TransactionType::Income => entry.0 = checked_add(entry.0, t.amount)?,
            TransactionType::Expense => entry.1 = checked_add(entry.1, t.amount)?,
        }
    }
    Ok(months)
}

/// Distinct non-empty categories, sorted.
pub fn distinct_categories<'a, I>(transactions: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut categories: Vec<String> = transactions
        .into_iter()
        .filter_map(|t| t.category.clone())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

/// Distinct tags across all transactions, sorted.
pub fn distinct_tags<'a, I>(transactions: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut tags: Vec<String> = transactions
        .into_iter()
        .flat_map(|t| t.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn tx(kind: TransactionType, amount: Decimal, category: Option<&str>, date: &str) -> Transaction {
        let now = Utc::now().naive_utc();
        Transaction {
            id: format!("{}-{}", date, amount),
            user_id: "u1".to_string(),
            transaction_type: kind,
            amount,
            description: None,
            category: category.map(str::to_string),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            tags: vec!["b".to_string(), "a".to_string()],
            is_recurring: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_totals_and_categories() {
        let txs = vec![
            tx(TransactionType::Income, dec!(1000), Some("Salary"), "2024-01-05"),
            tx(TransactionType::Expense, dec!(120.456), Some("Food"), "2024-01-10"),
            tx(TransactionType::Expense, dec!(30), Some("Food"), "2024-02-02"),
            tx(TransactionType::Expense, dec!(50), None, "2024-02-03"),
        ];

        let totals = compute_totals(&txs).unwrap();
        assert_eq!(totals.total_income, dec!(1000));
        assert_eq!(totals.total_expenses, dec!(200.46));
        assert_eq!(totals.balance, dec!(799.54));

        let by_category = expenses_by_category(&txs).unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category["Food"], dec!(150.46));

        let by_month = totals_by_month(&txs).unwrap();
        assert_eq!(
            by_month.keys().cloned().collect::<Vec<_>>(),
            vec!["2024-01", "2024-02"]
        );
        assert_eq!(by_month["2024-02"], (dec!(0), dec!(80)));

        assert_eq!(distinct_categories(&txs), vec!["Food", "Salary"]);
        assert_eq!(distinct_tags(&txs), vec!["a", "b"]);
    }

    #[test]
    fn test_totals_of_nothing_are_zero() {
        let totals = compute_totals(&Vec::<Transaction>::new()).unwrap();
        assert_eq!(totals, TransactionStats::default());
    }

    #[test]
    fn test_overflowing_totals_are_errors() {
        let txs = vec![
            tx(TransactionType::Expense, Decimal::MAX, Some("Food"), "2024-01-10"),
            tx(TransactionType::Expense, Decimal::MAX, Some("Food"), "2024-01-11"),
        ];
        assert!(compute_totals(&txs).is_err());
        assert!(expenses_by_category(&txs).is_err());
        assert!(totals_by_month(&txs).is_err());
    }
}
