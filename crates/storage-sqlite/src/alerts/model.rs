//! Database models for alerts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use budgetwise_core::alerts::Alert;
use budgetwise_core::errors::Error;

use crate::transactions::TransactionDB;
use crate::utils::parse_decimal;

#[derive(
    Queryable, Identifiable, Insertable, Associations, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(belongs_to(TransactionDB, foreign_key = transaction_id))]
#[diesel(table_name = crate::schema::alerts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AlertDB {
    pub id: String,
    pub transaction_id: String,
    pub threshold: String,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::alerts)]
pub struct AlertChangeset {
    pub threshold: Option<String>,
    pub active: Option<bool>,
}

impl TryFrom<AlertDB> for Alert {
    type Error = Error;

    fn try_from(db: AlertDB) -> Result<Self, Self::Error> {
        Ok(Self {
            threshold: parse_decimal(&db.threshold, "alert threshold")?,
            id: db.id,
            transaction_id: db.transaction_id,
            active: db.active,
            created_at: db.created_at,
        })
    }
}
