//! Alert domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::decimal_utils::validate_amount;
use crate::transactions::{Transaction, TransactionType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub transaction_id: String,
    pub threshold: Decimal,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

fn validate_threshold(threshold: Decimal) -> Result<Decimal> {
    validate_amount(threshold, "Threshold")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlert {
    pub transaction_id: String,
    pub threshold: Decimal,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAlertRecord {
    pub transaction_id: String,
    pub threshold: Decimal,
    pub active: bool,
}

impl NewAlert {
    pub fn validate(&self) -> Result<NewAlertRecord> {
        if self.transaction_id.trim().is_empty() {
            return Err(Error::invalid_input("Transaction id is required"));
        }
        let threshold = validate_threshold(self.threshold)?;
        Ok(NewAlertRecord {
            transaction_id: self.transaction_id.trim().to_string(),
            threshold,
            active: self.active.unwrap_or(true),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertUpdate {
    pub threshold: Option<Decimal>,
    pub active: Option<bool>,
}

impl AlertUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.threshold.is_none() && self.active.is_none() {
            return Err(Error::invalid_input("No alert fields to update"));
        }
        if let Some(threshold) = self.threshold {
            validate_threshold(threshold)?;
        }
        Ok(())
    }
}

/// The parts of a transaction shown next to its alert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertTransactionSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: NaiveDate,
}

impl From<&Transaction> for AlertTransactionSummary {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            transaction_type: t.transaction_type,
            amount: t.amount,
            description: t.description.clone(),
            category: t.category.clone(),
            date: t.date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertWithTransaction {
    #[serde(flatten)]
    pub alert: Alert,
    pub transaction: AlertTransactionSummary,
    /// Active and the transaction amount is above the threshold
    pub triggered: bool,
}

impl AlertWithTransaction {
    pub fn new(alert: Alert, transaction: &Transaction) -> Self {
        let triggered = alert.active && transaction.amount > alert.threshold;
        Self {
            alert,
            transaction: AlertTransactionSummary::from(transaction),
            triggered,
        }
    }
}
