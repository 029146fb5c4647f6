#[cfg(test)]
mod tests {
    use crate::budgets::{BudgetRepositoryTrait, NewBudget};
    use crate::errors::{DatabaseError, Error};
    use crate::reports::{GenerateReport, ReportListQuery, ReportService, ReportServiceTrait};
    use crate::test_support::{record, InMemoryBudgets, InMemoryReports, InMemoryTransactions};
    use crate::transactions::{TransactionRepositoryTrait, TransactionType};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    async fn setup() -> ReportService {
        let transactions = InMemoryTransactions::default();
        let budgets = InMemoryBudgets::default();

        let rows = [
            (TransactionType::Income, dec!(2500), Some("Salary"), "2024-03-01"),
            (TransactionType::Expense, dec!(800), Some("Rent"), "2024-03-02"),
            (TransactionType::Expense, dec!(200), None, "2024-03-20"),
            (TransactionType::Expense, dec!(90), Some("Food"), "2024-04-02"),
        ];
        for (kind, amount, category, date) in rows {
            transactions
                .create("u1", record(kind, amount, category, date))
                .await
                .unwrap();
        }
        budgets
            .upsert(
                "u1",
                NewBudget {
                    month: "2024-03".to_string(),
                    amount: dec!(2000),
                },
            )
            .await
            .unwrap();

        ReportService::new(
            Arc::new(InMemoryReports::default()),
            Arc::new(transactions),
            Arc::new(budgets),
        )
    }

    fn generate(month: &str) -> GenerateReport {
        GenerateReport {
            month: month.to_string(),
        }
    }

    #[tokio::test]
    async fn test_overview_totals() {
        let service = setup().await;
        let overview = service.get_overview("u1").unwrap();

        assert_eq!(overview.total_income, dec!(2500));
        assert_eq!(overview.total_expenses, dec!(1090));
        assert_eq!(overview.net_balance, dec!(1410));
        assert_eq!(overview.budget_usage.len(), 1);
        assert_eq!(overview.budget_usage[0].spent, dec!(1000));
        assert_eq!(overview.budget_usage[0].percentage, dec!(50));
        assert_eq!(overview.monthly_evolution.len(), 2);

        let empty = service.get_overview("nobody").unwrap();
        assert_eq!(empty.stats.transaction_count, 0);
    }

    #[tokio::test]
    async fn test_generate_report_stores_summary_once() {
        let service = setup().await;

        let report = service.generate_report("u1", generate("2024-03")).await.unwrap();
        assert_eq!(report.report_url, "/reports/u1/2024-03.json");
        assert_eq!(report.summary.transaction_count, 3);
        assert_eq!(report.summary.total_expenses, dec!(1000));
        assert_eq!(report.summary.budget_amount, dec!(2000));
        assert_eq!(report.summary.budget_used, dec!(50));
        assert_eq!(report.summary.expenses_by_category.len(), 1);

        let err = service
            .generate_report("u1", generate("2024-03"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));

        let fetched = service.get_report("u1", "2024-03").unwrap();
        assert_eq!(fetched.summary, report.summary);

        service.delete_report("u1", "2024-03").await.unwrap();
        assert!(service.generate_report("u1", generate("2024-03")).await.is_ok());
    }

    #[tokio::test]
    async fn test_generate_report_rejects_invalid_month() {
        let service = setup().await;
        let err = service
            .generate_report("u1", generate("2024-3"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_reports_filters_by_year() {
        let service = setup().await;
        for month in ["2023-12", "2024-03", "2024-04"] {
            service.generate_report("u1", generate(month)).await.unwrap();
        }

        let all = service.list_reports("u1", ReportListQuery::default()).unwrap();
        assert_eq!(all.count, 3);
        assert_eq!(all.reports[0].month, "2024-04");

        let in_2024 = service
            .list_reports(
                "u1",
                ReportListQuery {
                    year: Some("2024".to_string()),
                },
            )
            .unwrap();
        assert_eq!(in_2024.count, 2);

        for bad in ["1999", "3001", "twenty"] {
            let err = service
                .list_reports(
                    "u1",
                    ReportListQuery {
                        year: Some(bad.to_string()),
                    },
                )
                .unwrap_err();
            assert!(matches!(err, Error::Validation(_)));
        }
    }
}
