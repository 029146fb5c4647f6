//! Database models for reports.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use budgetwise_core::errors::Error;
use budgetwise_core::reports::{MonthlySummary, Report};

use crate::errors::StorageError;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::reports)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReportDB {
    pub id: String,
    pub user_id: String,
    pub month: String,
    pub report_url: String,
    /// JSON encoded `MonthlySummary`
    pub summary: String,
    pub generated_at: NaiveDateTime,
}

impl TryFrom<ReportDB> for Report {
    type Error = Error;

    fn try_from(db: ReportDB) -> Result<Self, Self::Error> {
        let summary: MonthlySummary =
            serde_json::from_str(&db.summary).map_err(StorageError::from)?;
        Ok(Self {
            id: db.id,
            user_id: db.user_id,
            month: db.month,
            report_url: db.report_url,
            summary,
            generated_at: db.generated_at,
        })
    }
}
