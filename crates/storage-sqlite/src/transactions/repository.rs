use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use budgetwise_core::transactions::{
    NewTransactionRecord, Transaction, TransactionFilter, TransactionRepositoryTrait,
};
use budgetwise_core::Result;

use super::model::{TransactionChangeset, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;
use crate::utils::{contains_pattern, format_date, LIKE_ESCAPE};

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

fn to_domain(rows: Vec<TransactionDB>) -> Result<Vec<Transaction>> {
    rows.into_iter().map(Transaction::try_from).collect()
}

/// Rows of `user_id` matching `filter`, without ordering or paging.
fn filtered_query<'a>(
    user_id: &'a str,
    filter: &'a TransactionFilter,
) -> transactions::BoxedQuery<'a, Sqlite> {
    let mut query = transactions::table
        .filter(transactions::user_id.eq(user_id))
        .into_boxed();

    if let Some(kind) = filter.transaction_type {
        query = query.filter(transactions::transaction_type.eq(kind.as_str()));
    }
    if let Some(category) = &filter.category {
        query = query.filter(
            transactions::category
                .like(contains_pattern(category))
                .escape(LIKE_ESCAPE),
        );
    }
    if let Some(start) = filter.start_date {
        query = query.filter(transactions::transaction_date.ge(format_date(start)));
    }
    if let Some(end) = filter.end_date {
        query = query.filter(transactions::transaction_date.le(format_date(end)));
    }
    if let Some(tags) = &filter.tags {
        query = query.filter(
            transactions::tags
                .like(contains_pattern(tags))
                .escape(LIKE_ESCAPE),
        );
    }
    query
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Option<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        transactions::table
            .filter(transactions::id.eq(transaction_id))
            .filter(transactions::user_id.eq(user_id))
            .select(TransactionDB::as_select())
            .first::<TransactionDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Transaction::try_from)
            .transpose()
    }

    fn search(&self, user_id: &str, filter: &TransactionFilter) -> Result<(Vec<Transaction>, i64)> {
        let mut conn = get_connection(&self.pool)?;

        let total = filtered_query(user_id, filter)
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;

        let rows = filtered_query(user_id, filter)
            .order((
                transactions::transaction_date.desc(),
                transactions::created_at.desc(),
            ))
            .limit(filter.limit)
            .offset(filter.offset())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok((to_domain(rows)?, total))
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .order((
                transactions::transaction_date.desc(),
                transactions::created_at.desc(),
            ))
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        to_domain(rows)
    }

    fn list_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::transaction_date.ge(format_date(start)))
            .filter(transactions::transaction_date.le(format_date(end)))
            .order((
                transactions::transaction_date.asc(),
                transactions::created_at.asc(),
            ))
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        to_domain(rows)
    }

    fn list_recent(&self, user_id: &str, limit: i64) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .order((
                transactions::transaction_date.desc(),
                transactions::created_at.desc(),
            ))
            .limit(limit)
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        to_domain(rows)
    }

    async fn create(&self, user_id: &str, record: NewTransactionRecord) -> Result<Transaction> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let new_row = TransactionDB::from_record(
                    Uuid::new_v4().to_string(),
                    user_id,
                    record,
                    Utc::now().naive_utc(),
                );
                let row = diesel::insert_into(transactions::table)
                    .values(&new_row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Transaction::try_from(row)
            })
            .await
    }

    async fn update(
        &self,
        user_id: &str,
        transaction_id: &str,
        record: NewTransactionRecord,
    ) -> Result<Transaction> {
        let user_id = user_id.to_string();
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let changes = TransactionChangeset::from_record(record, Utc::now().naive_utc());
                let row = diesel::update(
                    transactions::table
                        .filter(transactions::id.eq(transaction_id))
                        .filter(transactions::user_id.eq(user_id)),
                )
                .set(&changes)
                .returning(TransactionDB::as_returning())
                .get_result(conn)
                .map_err(StorageError::from)?;
                Transaction::try_from(row)
            })
            .await
    }

    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    transactions::table
                        .filter(transactions::id.eq(transaction_id))
                        .filter(transactions::user_id.eq(user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
