use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use budgetwise_core::reports::{NewReportRecord, Report, ReportRepositoryTrait};
use budgetwise_core::Result;

use super::model::ReportDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::reports;

pub struct ReportRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ReportRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ReportRepositoryTrait for ReportRepository {
    fn list_for_user(&self, user_id: &str, year: Option<i32>) -> Result<Vec<Report>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = reports::table
            .filter(reports::user_id.eq(user_id))
            .into_boxed();
        if let Some(year) = year {
            query = query.filter(reports::month.like(format!("{:04}-%", year)));
        }
        query
            .order(reports::month.desc())
            .load::<ReportDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Report::try_from)
            .collect()
    }

    fn find_by_month(&self, user_id: &str, month: &str) -> Result<Option<Report>> {
        let mut conn = get_connection(&self.pool)?;
        reports::table
            .filter(reports::user_id.eq(user_id))
            .filter(reports::month.eq(month))
            .select(ReportDB::as_select())
            .first::<ReportDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Report::try_from)
            .transpose()
    }

    async fn create(&self, user_id: &str, record: NewReportRecord) -> Result<Report> {
        let summary = serde_json::to_string(&record.summary).map_err(StorageError::from)?;
        let new_row = ReportDB {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            month: record.month,
            report_url: record.report_url,
            summary,
            generated_at: Utc::now().naive_utc(),
        };
        debug!("Storing report {} for {}", new_row.id, new_row.month);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Report> {
                let row = diesel::insert_into(reports::table)
                    .values(&new_row)
                    .returning(ReportDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Report::try_from(row)
            })
            .await
    }

    async fn delete_by_month(&self, user_id: &str, month: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let month = month.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    reports::table
                        .filter(reports::user_id.eq(user_id))
                        .filter(reports::month.eq(month)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
