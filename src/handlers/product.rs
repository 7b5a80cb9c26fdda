use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::{AppError, Result},
    handlers::AppState,
    models::product::{NewProduct, ProductChanges},
};

/// Get all products joined with their inventory
pub async fn get_products(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let products = state.product_store.get_products_with_inventory().await?;
    Ok((StatusCode::OK, Json(products)))
}

/// Get product by ID handler
pub async fn get_product_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let product = state
        .product_store
        .get_product_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;
    Ok((StatusCode::OK, Json(product)))
}

/// Create product handler
pub async fn create_product(
    State(state): State<AppState>,
    Json(new_product): Json<NewProduct>,
) -> Result<impl IntoResponse> {
    if new_product.code.is_empty() || new_product.name.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".into()));
    }

    let product = state.product_store.create_product(new_product).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update product handler
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(changes): Json<ProductChanges>,
) -> Result<impl IntoResponse> {
    let product = state
        .product_store
        .update_product(id, changes)
        .await?
        .ok_or(AppError::NotFound("Product"))?;
    Ok((StatusCode::OK, Json(product)))
}

/// Delete product handler
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    if !state.product_store.delete_product(id).await? {
        return Err(AppError::NotFound("Product"));
    }
    Ok(StatusCode::NO_CONTENT)
}
