use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use budgetwise_core::alerts::{Alert, AlertRepositoryTrait, AlertUpdate, NewAlertRecord};
use budgetwise_core::transactions::Transaction;
use budgetwise_core::Result;

use super::model::{AlertChangeset, AlertDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{alerts, transactions};
use crate::transactions::TransactionDB;

pub struct AlertRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AlertRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn to_domain(row: (AlertDB, TransactionDB)) -> Result<(Alert, Transaction)> {
    let (alert, transaction) = row;
    Ok((Alert::try_from(alert)?, Transaction::try_from(transaction)?))
}

#[async_trait]
impl AlertRepositoryTrait for AlertRepository {
    fn list_for_user(&self, user_id: &str) -> Result<Vec<(Alert, Transaction)>> {
        let mut conn = get_connection(&self.pool)?;
        alerts::table
            .inner_join(transactions::table)
            .filter(transactions::user_id.eq(user_id))
            .order(alerts::created_at.desc())
            .select((AlertDB::as_select(), TransactionDB::as_select()))
            .load::<(AlertDB, TransactionDB)>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    fn get_for_user(&self, user_id: &str, alert_id: &str) -> Result<Option<(Alert, Transaction)>> {
        let mut conn = get_connection(&self.pool)?;
        alerts::table
            .inner_join(transactions::table)
            .filter(alerts::id.eq(alert_id))
            .filter(transactions::user_id.eq(user_id))
            .select((AlertDB::as_select(), TransactionDB::as_select()))
            .first::<(AlertDB, TransactionDB)>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(to_domain)
            .transpose()
    }

    async fn create(&self, record: NewAlertRecord) -> Result<Alert> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Alert> {
                let new_row = AlertDB {
                    id: Uuid::new_v4().to_string(),
                    transaction_id: record.transaction_id,
                    threshold: record.threshold.to_string(),
                    active: record.active,
                    created_at: Utc::now().naive_utc(),
                };
                let row = diesel::insert_into(alerts::table)
                    .values(&new_row)
                    .returning(AlertDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Alert::try_from(row)
            })
            .await
    }

    async fn update(&self, alert_id: &str, update: AlertUpdate) -> Result<Alert> {
        let alert_id = alert_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Alert> {
                let changes = AlertChangeset {
                    threshold: update.threshold.map(|t| t.to_string()),
                    active: update.active,
                };
                let row = diesel::update(alerts::table.find(alert_id))
                    .set(&changes)
                    .returning(AlertDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Alert::try_from(row)
            })
            .await
    }

    async fn delete(&self, alert_id: &str) -> Result<usize> {
        let alert_id = alert_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(alerts::table.find(alert_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
