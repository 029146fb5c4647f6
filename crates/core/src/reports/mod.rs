//! Reports module - financial overview and stored monthly reports.

mod reports_model;
mod reports_service;
mod reports_summary;
mod reports_traits;

#[cfg(test)]
mod reports_service_tests;

pub use reports_model::{
    BudgetUsage, FinancialOverview, GenerateReport, MonthlyEvolution, MonthlySummary,
    NewReportRecord, OverviewStats, Report, ReportList, ReportListQuery,
};
pub use reports_service::{report_url, ReportService};
pub use reports_summary::{build_monthly_summary, build_overview};
pub use reports_traits::{ReportRepositoryTrait, ReportServiceTrait};
