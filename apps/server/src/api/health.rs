use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use budgetwise_storage_sqlite::db;

use crate::{error::ApiResult, main_lib::AppState};

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

/// Ready once the database answers.
#[utoipa::path(get, path = "/api/v1/readyz", responses((status = 200, description = "Ready")))]
pub async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    db::ping(&state.pool)?;
    Ok("ok")
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
