//! Database models for transactions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use budgetwise_core::errors::Error;
use budgetwise_core::transactions::{NewTransactionRecord, Transaction, TransactionType};

use crate::utils::{format_date, parse_decimal, parse_stored_date};

/// Database model for transactions. Field order follows the table columns.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub transaction_type: String,
    pub amount: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub transaction_date: String,
    /// Comma-joined
    pub tags: Option<String>,
    pub is_recurring: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Column values written on insert and update.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(treat_none_as_null = true)]
pub struct TransactionChangeset {
    pub transaction_type: String,
    pub amount: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub transaction_date: String,
    pub tags: Option<String>,
    pub is_recurring: bool,
    pub updated_at: NaiveDateTime,
}

fn join_tags(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        None
    } else {
        Some(tags.join(","))
    }
}

impl TransactionChangeset {
    pub fn from_record(record: NewTransactionRecord, updated_at: NaiveDateTime) -> Self {
        Self {
            transaction_type: record.transaction_type.as_str().to_string(),
            amount: record.amount.to_string(),
            description: record.description,
            category: record.category,
            transaction_date: format_date(record.date),
            tags: join_tags(&record.tags),
            is_recurring: record.is_recurring,
            updated_at,
        }
    }
}

impl TransactionDB {
    pub fn from_record(
        id: String,
        user_id: String,
        record: NewTransactionRecord,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            user_id,
            transaction_type: record.transaction_type.as_str().to_string(),
            amount: record.amount.to_string(),
            description: record.description,
            category: record.category,
            transaction_date: format_date(record.date),
            tags: join_tags(&record.tags),
            is_recurring: record.is_recurring,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            transaction_type: db.transaction_type.parse::<TransactionType>()?,
            amount: parse_decimal(&db.amount, "transaction amount")?,
            date: parse_stored_date(&db.transaction_date)?,
            tags: db
                .tags
                .as_deref()
                .map(|t| budgetwise_core::transactions::clean_tags(t.split(',')))
                .unwrap_or_default(),
            id: db.id,
            user_id: db.user_id,
            description: db.description,
            category: db.category,
            is_recurring: db.is_recurring,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
