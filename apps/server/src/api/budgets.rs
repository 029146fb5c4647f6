use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use budgetwise_core::budgets::{Budget, BudgetUpsertResult, NewBudget};

use crate::{
    auth::AuthenticatedUser, error::ApiResult, extract::ApiJson, main_lib::AppState,
};

async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<Budget>>> {
    let budgets = state.budget_service.list_budgets(&user.user_id)?;
    Ok(Json(budgets))
}

async fn upsert_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(budget): ApiJson<NewBudget>,
) -> ApiResult<(StatusCode, Json<BudgetUpsertResult>)> {
    let result = state
        .budget_service
        .upsert_budget(&user.user_id, budget)
        .await?;
    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(result)))
}

async fn get_budget(
    Path(month): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Budget>> {
    let budget = state.budget_service.get_budget(&user.user_id, &month)?;
    Ok(Json(budget))
}

async fn delete_budget(
    Path(month): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<StatusCode> {
    state
        .budget_service
        .delete_budget(&user.user_id, &month)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(list_budgets).post(upsert_budget))
        .route("/budgets/{month}", get(get_budget).delete(delete_budget))
}
