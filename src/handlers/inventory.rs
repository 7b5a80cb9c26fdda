use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::Result, handlers::AppState, models::inventory::UpdateInventoryRequest,
};

/// Get the inventory view: all products joined with stock levels
pub async fn get_inventory(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let inventory = state.product_store.get_products_with_inventory().await?;
    Ok((StatusCode::OK, Json(inventory)))
}

/// Update a product's inventory and append the ledger entry
pub async fn update_inventory(
    State(state): State<AppState>,
    Json(request): Json<UpdateInventoryRequest>,
) -> Result<impl IntoResponse> {
    let inventory = state
        .inventory_store
        .update_inventory(
            request.product_id,
            request.quantity,
            request.location.as_deref(),
            request.user_id,
        )
        .await?;
    Ok((StatusCode::OK, Json(inventory)))
}
