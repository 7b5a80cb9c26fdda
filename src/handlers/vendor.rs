use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::{AppError, Result},
    handlers::AppState,
    models::vendor::{NewVendor, VendorChanges},
};

/// Get all vendors handler
pub async fn get_all_vendors(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let vendors = state.vendor_store.get_all_vendors().await?;
    Ok((StatusCode::OK, Json(vendors)))
}

/// Get vendor by ID handler
pub async fn get_vendor_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let vendor = state
        .vendor_store
        .get_vendor_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Vendor"))?;
    Ok((StatusCode::OK, Json(vendor)))
}

/// Create vendor handler
pub async fn create_vendor(
    State(state): State<AppState>,
    Json(new_vendor): Json<NewVendor>,
) -> Result<impl IntoResponse> {
    if new_vendor.name.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".into()));
    }

    let vendor = state.vendor_store.create_vendor(new_vendor).await?;
    Ok((StatusCode::CREATED, Json(vendor)))
}

/// Update vendor handler
pub async fn update_vendor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(changes): Json<VendorChanges>,
) -> Result<impl IntoResponse> {
    let vendor = state
        .vendor_store
        .update_vendor(id, changes)
        .await?
        .ok_or(AppError::NotFound("Vendor"))?;
    Ok((StatusCode::OK, Json(vendor)))
}

/// Delete vendor handler
pub async fn delete_vendor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    if !state.vendor_store.delete_vendor(id).await? {
        return Err(AppError::NotFound("Vendor"));
    }
    Ok(StatusCode::NO_CONTENT)
}
