mod common;

use axum::http::StatusCode;
use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn monthly_report_lifecycle() {
    let app = spawn_app().await;
    let token = app.register("reports@example.com").await;

    app.post(
        "/api/v1/budgets",
        &token,
        json!({ "month": "2024-03", "amount": 200 }),
    )
    .await;
    for (kind, amount, category, date) in [
        ("income", 1000, "Salary", "2024-03-01"),
        ("expense", 50, "Food", "2024-03-05"),
        ("expense", 100, "Transport", "2024-03-20"),
        ("expense", 999, "Food", "2024-04-01"),
    ] {
        let (status, _) = app
            .post(
                "/api/v1/transactions",
                &token,
                json!({ "type": kind, "amount": amount, "category": category, "date": date }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, report) = app
        .post("/api/v1/reports", &token, json!({ "month": "2024-03" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["month"], "2024-03");
    assert!(report["reportUrl"]
        .as_str()
        .unwrap()
        .ends_with("/2024-03.json"));
    let summary = &report["summary"];
    assert_eq!(summary["totalIncome"], 1000.0);
    assert_eq!(summary["totalExpenses"], 150.0);
    assert_eq!(summary["netBalance"], 850.0);
    assert_eq!(summary["transactionCount"], 3);
    assert_eq!(summary["expensesByCategory"]["Food"], 50.0);
    assert_eq!(summary["budgetAmount"], 200.0);
    assert_eq!(summary["budgetUsed"], 75.0);

    let (status, _) = app
        .post("/api/v1/reports", &token, json!({ "month": "2024-03" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post("/api/v1/reports", &token, json!({ "month": "March" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, fetched) = app.get("/api/v1/reports/2024-03", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["summary"], report["summary"]);

    let (_, list) = app.get("/api/v1/reports?year=2024", &token).await;
    assert_eq!(list["count"], 1);
    let (_, list) = app.get("/api/v1/reports?year=2023", &token).await;
    assert_eq!(list["count"], 0);
    let (status, _) = app.get("/api/v1/reports?year=1999", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.delete("/api/v1/reports/2024-03", &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app
        .post("/api/v1/reports", &token, json!({ "month": "2024-03" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn overview_and_dashboard() {
    let app = spawn_app().await;
    let token = app.register("overview@example.com").await;

    let (status, empty) = app.get("/api/v1/reports/overview", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["totalIncome"], 0.0);
    assert_eq!(empty["stats"]["averageMonthlyIncome"], 0.0);

    app.post(
        "/api/v1/budgets",
        &token,
        json!({ "month": "2024-01", "amount": 100 }),
    )
    .await;
    for (kind, amount, category, date) in [
        ("income", 300, "Salary", "2024-01-01"),
        ("expense", 25, "Food", "2024-01-02"),
        ("income", 100, "Salary", "2024-02-01"),
        ("expense", 75, "Food", "2024-02-10"),
    ] {
        app.post(
            "/api/v1/transactions",
            &token,
            json!({ "type": kind, "amount": amount, "category": category, "date": date }),
        )
        .await;
    }

    let (_, overview) = app.get("/api/v1/reports/overview", &token).await;
    assert_eq!(overview["totalIncome"], 400.0);
    assert_eq!(overview["totalExpenses"], 100.0);
    assert_eq!(overview["netBalance"], 300.0);
    assert_eq!(overview["expensesByCategory"]["Food"], 100.0);
    assert_eq!(overview["budgetUsage"][0]["spent"], 25.0);
    assert_eq!(overview["budgetUsage"][0]["percentage"], 25.0);
    assert_eq!(overview["monthlyEvolution"][0]["month"], "2024-01");
    assert_eq!(overview["monthlyEvolution"][1]["balance"], 25.0);
    assert_eq!(overview["stats"]["transactionCount"], 4);
    assert_eq!(overview["stats"]["averageMonthlyIncome"], 200.0);

    let (status, dashboard) = app.get("/api/v1/dashboard", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["recentTransactions"].as_array().unwrap().len(), 4);
    assert_eq!(dashboard["recentTransactions"][0]["date"], "2024-02-10");
    assert_eq!(dashboard["balance"], 300.0);
}
