use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::reports_model::{
    FinancialOverview, GenerateReport, NewReportRecord, Report, ReportList, ReportListQuery,
};
use super::reports_summary::{build_monthly_summary, build_overview};
use super::reports_traits::{ReportRepositoryTrait, ReportServiceTrait};
use crate::budgets::BudgetRepositoryTrait;
use crate::errors::{DatabaseError, Error, Result};
use crate::transactions::TransactionRepositoryTrait;
use crate::utils::time_utils::{month_bounds, validate_month};

/// Locator of the stored summary of a report.
pub fn report_url(user_id: &str, month: &str) -> String {
    format!("/reports/{}/{}.json", user_id, month)
}

pub struct ReportService {
    repository: Arc<dyn ReportRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
}

impl ReportService {
    pub fn new(
        repository: Arc<dyn ReportRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            transaction_repository,
            budget_repository,
        }
    }
}

#[async_trait]
impl ReportServiceTrait for ReportService {
    fn get_overview(&self, user_id: &str) -> Result<FinancialOverview> {
        let transactions = self.transaction_repository.list_for_user(user_id)?;
        let budgets = self.budget_repository.list_for_user(user_id)?;
        build_overview(&transactions, &budgets)
    }

    async fn generate_report(&self, user_id: &str, request: GenerateReport) -> Result<Report> {
        let month = request.month.trim();
        validate_month(month)?;
        if self.repository.find_by_month(user_id, month)?.is_some() {
            return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                "A report for {} already exists",
                month
            ))));
        }

        let (start, end) = month_bounds(month)?;
        let transactions = self
            .transaction_repository
            .list_between(user_id, start, end)?;
        let budget = self.budget_repository.find_by_month(user_id, month)?;
        let summary = build_monthly_summary(month, &transactions, budget.as_ref())?;

        let report = self
            .repository
            .create(
                user_id,
                NewReportRecord {
                    month: month.to_string(),
                    report_url: report_url(user_id, month),
                    summary,
                },
            )
            .await?;
        info!("Generated report {} for {}", report.id, report.month);
        Ok(report)
    }

    fn list_reports(&self, user_id: &str, query: ReportListQuery) -> Result<ReportList> {
        let year = query.year()?;
        let reports = self.repository.list_for_user(user_id, year)?;
        Ok(ReportList {
            count: reports.len(),
            reports,
        })
    }

    fn get_report(&self, user_id: &str, month: &str) -> Result<Report> {
        validate_month(month)?;
        self.repository
            .find_by_month(user_id, month)?
            .ok_or_else(|| Error::NotFound(format!("Report for {}", month)))
    }

    async fn delete_report(&self, user_id: &str, month: &str) -> Result<()> {
        validate_month(month)?;
        if self.repository.delete_by_month(user_id, month).await? == 0 {
            return Err(Error::NotFound(format!("Report for {}", month)));
        }
        Ok(())
    }
}
