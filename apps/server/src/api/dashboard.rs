use std::sync::Arc;

use axum::{extract::State, routing::get, Extension, Json, Router};
use budgetwise_core::{dashboard::DashboardSummary, utils::time_utils::today_utc};

use crate::{auth::AuthenticatedUser, error::ApiResult, main_lib::AppState};

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<DashboardSummary>> {
    let summary = state
        .dashboard_service
        .get_summary(&user.user_id, today_utc())?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(get_dashboard))
}
