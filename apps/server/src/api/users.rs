use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use budgetwise_core::users::{PasswordChange, UserProfileUpdate};

use crate::{
    auth::AuthenticatedUser, error::ApiResult, extract::ApiJson, main_lib::AppState,
    models::UserView,
};

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<UserView>> {
    let profile = state.user_service.get_user(&user.user_id)?;
    Ok(Json(profile.into()))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(update): ApiJson<UserProfileUpdate>,
) -> ApiResult<Json<UserView>> {
    let updated = state
        .user_service
        .update_profile(&user.user_id, update)
        .await?;
    Ok(Json(updated.into()))
}

async fn delete_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<StatusCode> {
    state.user_service.delete_user(&user.user_id).await?;
    tracing::info!("Deleted account {}", user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(change): ApiJson<PasswordChange>,
) -> ApiResult<StatusCode> {
    state
        .user_service
        .change_password(&user.user_id, change)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/users/profile",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .route("/users/password", put(change_password))
}
