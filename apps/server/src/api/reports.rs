use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use budgetwise_core::reports::{
    FinancialOverview, GenerateReport, Report, ReportList, ReportListQuery,
};

use crate::{
    auth::AuthenticatedUser, error::ApiResult, extract::ApiJson, main_lib::AppState,
};

async fn get_overview(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<FinancialOverview>> {
    Ok(Json(state.report_service.get_overview(&user.user_id)?))
}

async fn list_reports(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ReportListQuery>,
) -> ApiResult<Json<ReportList>> {
    Ok(Json(state.report_service.list_reports(&user.user_id, query)?))
}

async fn generate_report(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<GenerateReport>,
) -> ApiResult<(StatusCode, Json<Report>)> {
    let report = state
        .report_service
        .generate_report(&user.user_id, request)
        .await?;
    tracing::info!("Generated report {} for {}", report.month, user.user_id);
    Ok((StatusCode::CREATED, Json(report)))
}

async fn get_report(
    Path(month): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Report>> {
    Ok(Json(state.report_service.get_report(&user.user_id, &month)?))
}

async fn delete_report(
    Path(month): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<StatusCode> {
    state
        .report_service
        .delete_report(&user.user_id, &month)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reports/overview", get(get_overview))
        .route("/reports", get(list_reports).post(generate_report))
        .route("/reports/{month}", get(get_report).delete(delete_report))
}
