//! In-memory repositories shared by the service tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::alerts::{Alert, AlertRepositoryTrait, AlertUpdate, NewAlertRecord};
use crate::budgets::{Budget, BudgetRepositoryTrait, BudgetUpsertResult, NewBudget};
use crate::errors::{DatabaseError, Error, Result};
use crate::reports::{NewReportRecord, Report, ReportRepositoryTrait};
use crate::transactions::{
    NewTransactionRecord, Transaction, TransactionFilter, TransactionRepositoryTrait,
    TransactionType,
};

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

fn next_id(prefix: &str) -> String {
    format!("{}-{}", prefix, NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn record(kind: TransactionType, amount: Decimal, category: Option<&str>, day: &str) -> NewTransactionRecord {
    NewTransactionRecord {
        transaction_type: kind,
        amount,
        description: None,
        category: category.map(str::to_string),
        date: date(day),
        tags: vec![],
        is_recurring: false,
    }
}

#[derive(Clone, Default)]
pub struct InMemoryTransactions {
    pub rows: Arc<Mutex<Vec<Transaction>>>,
}

impl InMemoryTransactions {
    fn sorted_for_user(&self, user_id: &str) -> Vec<Transaction> {
        let mut rows: Vec<Transaction> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        rows
    }
}

#[async_trait]
impl TransactionRepositoryTrait for InMemoryTransactions {
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Option<Transaction>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.user_id == user_id && t.id == transaction_id)
            .cloned())
    }

    fn search(&self, user_id: &str, filter: &TransactionFilter) -> Result<(Vec<Transaction>, i64)> {
        let matches: Vec<Transaction> = self
            .sorted_for_user(user_id)
            .into_iter()
            .filter(|t| filter.transaction_type.map_or(true, |k| t.transaction_type == k))
            .filter(|t| {
                filter.category.as_ref().map_or(true, |c| {
                    t.category.as_deref().is_some_and(|tc| tc.contains(c.as_str()))
                })
            })
            .filter(|t| filter.start_date.map_or(true, |d| t.date >= d))
            .filter(|t| filter.end_date.map_or(true, |d| t.date <= d))
            .filter(|t| {
                filter
                    .tags
                    .as_ref()
                    .map_or(true, |tag| t.tags.join(",").contains(tag.as_str()))
            })
            .collect();
        let total = matches.len() as i64;
        let page = matches
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.limit as usize)
            .collect();
        Ok((page, total))
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        Ok(self.sorted_for_user(user_id))
    }

    fn list_between(&self, user_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>> {
        let mut rows: Vec<Transaction> = self
            .sorted_for_user(user_id)
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect();
        rows.reverse();
        Ok(rows)
    }

    fn list_recent(&self, user_id: &str, limit: i64) -> Result<Vec<Transaction>> {
        Ok(self
            .sorted_for_user(user_id)
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn create(&self, user_id: &str, record: NewTransactionRecord) -> Result<Transaction> {
        let mut rows = self.rows.lock().unwrap();
        let transaction = Transaction {
            id: next_id("tx"),
            user_id: user_id.to_string(),
            transaction_type: record.transaction_type,
            amount: record.amount,
            description: record.description,
            category: record.category,
            date: record.date,
            tags: record.tags,
            is_recurring: record.is_recurring,
            created_at: now(),
            updated_at: now(),
        };
        rows.push(transaction.clone());
        Ok(transaction)
    }

    async fn update(
        &self,
        user_id: &str,
        transaction_id: &str,
        record: NewTransactionRecord,
    ) -> Result<Transaction> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| t.user_id == user_id && t.id == transaction_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(transaction_id.to_string())))?;
        row.transaction_type = record.transaction_type;
        row.amount = record.amount;
        row.description = record.description;
        row.category = record.category;
        row.date = record.date;
        row.tags = record.tags;
        row.is_recurring = record.is_recurring;
        row.updated_at = now();
        Ok(row.clone())
    }

    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<usize> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| !(t.user_id == user_id && t.id == transaction_id));
        Ok(before - rows.len())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryBudgets {
    pub rows: Arc<Mutex<Vec<Budget>>>,
}

#[async_trait]
impl BudgetRepositoryTrait for InMemoryBudgets {
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Budget>> {
        let mut rows: Vec<Budget> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.month.cmp(&a.month));
        Ok(rows)
    }

    fn find_by_month(&self, user_id: &str, month: &str) -> Result<Option<Budget>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.user_id == user_id && b.month == month)
            .cloned())
    }

    async fn upsert(&self, user_id: &str, budget: NewBudget) -> Result<BudgetUpsertResult> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows
            .iter_mut()
            .find(|b| b.user_id == user_id && b.month == budget.month)
        {
            existing.amount = budget.amount;
            existing.updated_at = now();
            return Ok(BudgetUpsertResult {
                budget: existing.clone(),
                created: false,
            });
        }
        let created = Budget {
            id: next_id("budget"),
            user_id: user_id.to_string(),
            month: budget.month,
            amount: budget.amount,
            created_at: now(),
            updated_at: now(),
        };
        rows.push(created.clone());
        Ok(BudgetUpsertResult {
            budget: created,
            created: true,
        })
    }

    async fn delete_by_month(&self, user_id: &str, month: &str) -> Result<usize> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|b| !(b.user_id == user_id && b.month == month));
        Ok(before - rows.len())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAlerts {
    pub rows: Arc<Mutex<Vec<Alert>>>,
    pub transactions: InMemoryTransactions,
}

impl InMemoryAlerts {
    pub fn new(transactions: InMemoryTransactions) -> Self {
        Self {
            rows: Arc::default(),
            transactions,
        }
    }
}

#[async_trait]
impl AlertRepositoryTrait for InMemoryAlerts {
    fn list_for_user(&self, user_id: &str) -> Result<Vec<(Alert, Transaction)>> {
        let rows = self.rows.lock().unwrap();
        let mut joined = Vec::new();
        for alert in rows.iter().rev() {
            if let Some(t) = self.transactions.get_by_id(user_id, &alert.transaction_id)? {
                joined.push((alert.clone(), t));
            }
        }
        Ok(joined)
    }

    fn get_for_user(&self, user_id: &str, alert_id: &str) -> Result<Option<(Alert, Transaction)>> {
        Ok(self
            .list_for_user(user_id)?
            .into_iter()
            .find(|(a, _)| a.id == alert_id))
    }

    async fn create(&self, record: NewAlertRecord) -> Result<Alert> {
        let mut rows = self.rows.lock().unwrap();
        let alert = Alert {
            id: next_id("alert"),
            transaction_id: record.transaction_id,
            threshold: record.threshold,
            active: record.active,
            created_at: now(),
        };
        rows.push(alert.clone());
        Ok(alert)
    }

    async fn update(&self, alert_id: &str, update: AlertUpdate) -> Result<Alert> {
        let mut rows = self.rows.lock().unwrap();
        let alert = rows
            .iter_mut()
            .find(|a| a.id == alert_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(alert_id.to_string())))?;
        if let Some(threshold) = update.threshold {
            alert.threshold = threshold;
        }
        if let Some(active) = update.active {
            alert.active = active;
        }
        Ok(alert.clone())
    }

    async fn delete(&self, alert_id: &str) -> Result<usize> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.id != alert_id);
        Ok(before - rows.len())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryReports {
    pub rows: Arc<Mutex<Vec<Report>>>,
}

#[async_trait]
impl ReportRepositoryTrait for InMemoryReports {
    fn list_for_user(&self, user_id: &str, year: Option<i32>) -> Result<Vec<Report>> {
        let prefix = year.map(|y| format!("{}-", y));
        let mut rows: Vec<Report> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| prefix.as_ref().map_or(true, |p| r.month.starts_with(p.as_str())))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.month.cmp(&a.month));
        Ok(rows)
    }

    fn find_by_month(&self, user_id: &str, month: &str) -> Result<Option<Report>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user_id == user_id && r.month == month)
            .cloned())
    }

    async fn create(&self, user_id: &str, record: NewReportRecord) -> Result<Report> {
        let mut rows = self.rows.lock().unwrap();
        let report = Report {
            id: next_id("report"),
            user_id: user_id.to_string(),
            month: record.month,
            report_url: record.report_url,
            summary: record.summary,
            generated_at: now(),
        };
        rows.push(report.clone());
        Ok(report)
    }

    async fn delete_by_month(&self, user_id: &str, month: &str) -> Result<usize> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !(r.user_id == user_id && r.month == month));
        Ok(before - rows.len())
    }
}
