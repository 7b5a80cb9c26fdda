use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::{AppError, Result},
    handlers::AppState,
    models::transaction::{NewTransaction, TransactionChanges},
};

/// Get all ledger transactions handler
pub async fn get_all_transactions(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let transactions = state.transaction_store.get_all_transactions().await?;
    Ok((StatusCode::OK, Json(transactions)))
}

/// Get transaction by ID handler
pub async fn get_transaction_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let transaction = state
        .transaction_store
        .get_transaction_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Transaction"))?;
    Ok((StatusCode::OK, Json(transaction)))
}

/// Create transaction handler
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<impl IntoResponse> {
    if new_transaction.transaction_type.is_empty() || new_transaction.date.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".into()));
    }

    let transaction = state
        .transaction_store
        .create_transaction(new_transaction)
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Update transaction handler
pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(changes): Json<TransactionChanges>,
) -> Result<impl IntoResponse> {
    let transaction = state
        .transaction_store
        .update_transaction(id, changes)
        .await?
        .ok_or(AppError::NotFound("Transaction"))?;
    Ok((StatusCode::OK, Json(transaction)))
}

/// Delete transaction handler
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    if !state.transaction_store.delete_transaction(id).await? {
        return Err(AppError::NotFound("Transaction"));
    }
    Ok(StatusCode::NO_CONTENT)
}
