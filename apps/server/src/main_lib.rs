use std::sync::Arc;

use budgetwise_core::{
    alerts::{AlertService, AlertServiceTrait},
    budgets::{BudgetService, BudgetServiceTrait},
    dashboard::{DashboardService, DashboardServiceTrait},
    reports::{ReportService, ReportServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
    users::{UserService, UserServiceTrait},
};
use budgetwise_storage_sqlite::{
    alerts::AlertRepository,
    budgets::BudgetRepository,
    db::{self, DbPool},
    reports::ReportRepository,
    transactions::TransactionRepository,
    users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    auth::{Argon2Hasher, AuthManager},
    config::{Config, LogFormat},
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub budget_service: Arc<dyn BudgetServiceTrait + Send + Sync>,
    pub transaction_service: Arc<dyn TransactionServiceTrait + Send + Sync>,
    pub alert_service: Arc<dyn AlertServiceTrait + Send + Sync>,
    pub report_service: Arc<dyn ReportServiceTrait + Send + Sync>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait + Send + Sync>,
    pub auth: Arc<AuthManager>,
    pub pool: Arc<DbPool>,
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match LogFormat::from_env() {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(pool.as_ref().clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let budget_repository = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let transaction_repository =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let alert_repository = Arc::new(AlertRepository::new(pool.clone(), writer.clone()));
    let report_repository = Arc::new(ReportRepository::new(pool.clone(), writer));

    let user_service = Arc::new(UserService::new(
        user_repository,
        Arc::new(Argon2Hasher),
    ));
    let budget_service = Arc::new(BudgetService::new(budget_repository.clone()));
    let transaction_service = Arc::new(TransactionService::new(transaction_repository.clone()));
    let alert_service = Arc::new(AlertService::new(
        alert_repository,
        transaction_repository.clone(),
    ));
    let report_service = Arc::new(ReportService::new(
        report_repository,
        transaction_repository.clone(),
        budget_repository.clone(),
    ));
    let dashboard_service = Arc::new(DashboardService::new(
        transaction_repository,
        budget_repository,
    ));

    let auth = Arc::new(AuthManager::new(&config.auth));

    Ok(Arc::new(AppState {
        user_service,
        budget_service,
        transaction_service,
        alert_service,
        report_service,
        dashboard_service,
        auth,
        pool,
    }))
}
