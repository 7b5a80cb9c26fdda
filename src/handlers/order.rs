use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    handlers::AppState,
    models::order::{NewOrder, OrderChanges},
};

#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
}

/// Get all orders, optionally narrowed to one status
pub async fn get_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<impl IntoResponse> {
    let orders = match &query.status {
        Some(status) => state.order_store.get_orders_by_status(status).await?,
        None => state.order_store.get_all_orders().await?,
    };
    Ok((StatusCode::OK, Json(orders)))
}

/// Get orders created today
pub async fn get_today_orders(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let orders = state.order_store.get_today_orders().await?;
    Ok((StatusCode::OK, Json(orders)))
}

/// Get orders with vendor and item details attached
pub async fn get_detailed_orders(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let orders = state.order_store.get_detailed_orders().await?;
    Ok((StatusCode::OK, Json(orders)))
}

/// Get order by ID handler
pub async fn get_order_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let order = state
        .order_store
        .get_order_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Order"))?;
    Ok((StatusCode::OK, Json(order)))
}

/// Create an order with its items and purchase ledger entry
pub async fn create_order(
    State(state): State<AppState>,
    Json(new_order): Json<NewOrder>,
) -> Result<impl IntoResponse> {
    if new_order.order_number.is_empty() || new_order.date.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".into()));
    }

    let order = state.order_store.create_order(new_order).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Update order handler
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(changes): Json<OrderChanges>,
) -> Result<impl IntoResponse> {
    let order = state
        .order_store
        .update_order(id, changes)
        .await?
        .ok_or(AppError::NotFound("Order"))?;
    Ok((StatusCode::OK, Json(order)))
}

/// Delete order handler
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    if !state.order_store.delete_order(id).await? {
        return Err(AppError::NotFound("Order"));
    }
    Ok(StatusCode::NO_CONTENT)
}
