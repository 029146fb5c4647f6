use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use budgetwise_core::alerts::{AlertUpdate, AlertWithTransaction, NewAlert};

use crate::{
    auth::AuthenticatedUser, error::ApiResult, extract::ApiJson, main_lib::AppState,
};

async fn list_alerts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<AlertWithTransaction>>> {
    Ok(Json(state.alert_service.list_alerts(&user.user_id)?))
}

async fn create_alert(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(payload): ApiJson<NewAlert>,
) -> ApiResult<(StatusCode, Json<AlertWithTransaction>)> {
    let alert = state
        .alert_service
        .create_alert(&user.user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(alert)))
}

async fn get_alert(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<AlertWithTransaction>> {
    Ok(Json(state.alert_service.get_alert(&user.user_id, &id)?))
}

async fn update_alert(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(update): ApiJson<AlertUpdate>,
) -> ApiResult<Json<AlertWithTransaction>> {
    let alert = state
        .alert_service
        .update_alert(&user.user_id, &id, update)
        .await?;
    Ok(Json(alert))
}

async fn delete_alert(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<StatusCode> {
    state.alert_service.delete_alert(&user.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/alerts", get(list_alerts).post(create_alert))
        .route(
            "/alerts/{id}",
            get(get_alert).put(update_alert).delete(delete_alert),
        )
}
