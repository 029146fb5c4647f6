//! Transaction domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_PAGE_SIZE, MAX_CATEGORY_LENGTH, MAX_DESCRIPTION_LENGTH, MAX_PAGE_SIZE,
};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::decimal_utils::validate_amount;
use crate::utils::time_utils::parse_date;

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::invalid_input(format!(
                "Transaction type must be 'income' or 'expense', got '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing an income or expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub is_recurring: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Splits, trims and drops blank tags.
pub fn clean_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Tags are stored comma-joined, so a tag cannot itself contain a comma.
fn validate_tags(tags: &[String]) -> Result<Vec<String>> {
    if let Some(tag) = tags.iter().find(|t| t.contains(',')) {
        return Err(Error::invalid_input(format!(
            "Tag '{}' must not contain a comma",
            tag.trim()
        )));
    }
    Ok(clean_tags(tags))
}

fn normalize_text(value: Option<&str>, field: &str, max_len: usize) -> Result<Option<String>> {
    let Some(value) = value.map(str::trim) else {
        return Ok(None);
    };
    if value.chars().count() > max_len {
        return Err(Error::invalid_input(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    })
}

/// Input model for creating a transaction, as received from clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type", default)]
    pub transaction_type: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub date: String,
    pub tags: Option<Vec<String>>,
    pub is_recurring: Option<bool>,
}

/// Validated transaction ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransactionRecord {
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub is_recurring: bool,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<NewTransactionRecord> {
        if self.transaction_type.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "type".to_string(),
            )));
        }
        Ok(NewTransactionRecord {
            transaction_type: self.transaction_type.parse()?,
            amount: validate_amount(self.amount, "Amount")?,
            description: normalize_text(
                self.description.as_deref(),
                "Description",
                MAX_DESCRIPTION_LENGTH,
            )?,
            category: normalize_text(self.category.as_deref(), "Category", MAX_CATEGORY_LENGTH)?,
            date: parse_date(&self.date)?,
            tags: validate_tags(self.tags.as_deref().unwrap_or_default())?,
            is_recurring: self.is_recurring.unwrap_or(false),
        })
    }
}

/// Partial update of a transaction. Absent fields keep their value; an empty
/// description or category clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_recurring: Option<bool>,
}

impl TransactionUpdate {
    /// Applies the update on top of an existing transaction.
    pub fn apply_to(&self, existing: &Transaction) -> Result<NewTransactionRecord> {
        let transaction_type = match &self.transaction_type {
            Some(t) => t.parse()?,
            None => existing.transaction_type,
        };
        let amount = match self.amount {
            Some(a) => validate_amount(a, "Amount")?,
            None => existing.amount,
        };
        let description = match &self.description {
            Some(d) => normalize_text(Some(d), "Description", MAX_DESCRIPTION_LENGTH)?,
            None => existing.description.clone(),
        };
        let category = match &self.category {
            Some(c) => normalize_text(Some(c), "Category", MAX_CATEGORY_LENGTH)?,
            None => existing.category.clone(),
        };
        let date = match &self.date {
            Some(d) => parse_date(d)?,
            None => existing.date,
        };
        let tags = match &self.tags {
            Some(t) => validate_tags(t)?,
            None => existing.tags.clone(),
        };
        Ok(NewTransactionRecord {
            transaction_type,
            amount,
            description,
            category,
            date,
            tags,
            is_recurring: self.is_recurring.unwrap_or(existing.is_recurring),
        })
    }
}

/// Raw listing query, as taken from the URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub tags: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Validated listing filter.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    /// Substring matched against the category
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Substring matched against the stored tags
    pub tags: Option<String>,
    pub page: i64,
    pub limit: i64,
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self {
            transaction_type: None,
            category: None,
            start_date: None,
            end_date: None,
            tags: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TransactionFilter {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl TransactionQuery {
    /// Unknown transaction types are ignored rather than rejected.
    pub fn into_filter(self) -> Result<TransactionFilter> {
        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err(Error::invalid_input("Page must be a positive integer"));
        }
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(Error::invalid_input(format!(
                "Limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if (page - 1).checked_mul(limit).is_none() {
            return Err(Error::invalid_input("Page is out of range"));
        }
        Ok(TransactionFilter {
            transaction_type: non_blank(&self.transaction_type).and_then(|t| t.parse().ok()),
            category: non_blank(&self.category).map(str::to_string),
            start_date: non_blank(&self.start_date).map(parse_date).transpose()?,
            end_date: non_blank(&self.end_date).map(parse_date).transpose()?,
            tags: non_blank(&self.tags).map(str::to_string),
            page,
            limit,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total_items: i64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + limit - 1) / limit
        };
        Self {
            current_page: page,
            total_pages,
            total_items,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
}

/// One page of the transaction listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub pagination: Pagination,
    pub stats: TransactionStats,
    pub categories: Vec<String>,
    pub all_tags: Vec<String>,
}
