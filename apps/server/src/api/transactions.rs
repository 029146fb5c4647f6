use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use budgetwise_core::transactions::{
    NewTransaction, Transaction, TransactionPage, TransactionQuery, TransactionUpdate,
};

use crate::{
    auth::AuthenticatedUser, error::ApiResult, extract::ApiJson, main_lib::AppState,
};

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<TransactionQuery>,
) -> ApiResult<Json<TransactionPage>> {
    let page = state
        .transaction_service
        .list_transactions(&user.user_id, query)?;
    Ok(Json(page))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(payload): ApiJson<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let created = state
        .transaction_service
        .create_transaction(&user.user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state
        .transaction_service
        .get_transaction(&user.user_id, &id)?;
    Ok(Json(transaction))
}

async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(update): ApiJson<TransactionUpdate>,
) -> ApiResult<Json<Transaction>> {
    let updated = state
        .transaction_service
        .update_transaction(&user.user_id, &id, update)
        .await?;
    Ok(Json(updated))
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<StatusCode> {
    state
        .transaction_service
        .delete_transaction(&user.user_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
