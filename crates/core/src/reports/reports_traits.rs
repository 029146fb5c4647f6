use async_trait::async_trait;

use super::reports_model::{
    FinancialOverview, GenerateReport, NewReportRecord, Report, ReportList, ReportListQuery,
};
use crate::errors::Result;

/// Trait for report repository operations
#[async_trait]
pub trait ReportRepositoryTrait: Send + Sync {
    /// Reports of a user, newest month first, optionally limited to one year.
    fn list_for_user(&self, user_id: &str, year: Option<i32>) -> Result<Vec<Report>>;
    fn find_by_month(&self, user_id: &str, month: &str) -> Result<Option<Report>>;
    async fn create(&self, user_id: &str, record: NewReportRecord) -> Result<Report>;
    async fn delete_by_month(&self, user_id: &str, month: &str) -> Result<usize>;
}

/// Trait for report service operations
#[async_trait]
pub trait ReportServiceTrait: Send + Sync {
    fn get_overview(&self, user_id: &str) -> Result<FinancialOverview>;
    async fn generate_report(&self, user_id: &str, request: GenerateReport) -> Result<Report>;
    fn list_reports(&self, user_id: &str, query: ReportListQuery) -> Result<ReportList>;
    fn get_report(&self, user_id: &str, month: &str) -> Result<Report>;
    async fn delete_report(&self, user_id: &str, month: &str) -> Result<()>;
}
