use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{AppError, Result},
    handlers::AppState,
    models::estimate::{EstimatePayload, EstimateStatus, NewEstimate, StatusUpdate},
};

#[derive(Debug, Default, Deserialize)]
pub struct EstimateListQuery {
    pub status: Option<String>,
}

fn parse_status(value: &str) -> Result<EstimateStatus> {
    EstimateStatus::parse(value)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid status value: {value}")))
}

/// Validate an estimate payload into its stored form. Missing required
/// fields and unknown status values are rejected here, before storage.
fn validate_payload(payload: EstimatePayload) -> Result<NewEstimate> {
    if payload.estimate_no.is_empty() || payload.customer_name.is_empty() || payload.date.is_empty()
    {
        return Err(AppError::BadRequest("Missing required fields".into()));
    }

    let status = match payload.status.as_deref() {
        Some(value) => parse_status(value)?,
        None => EstimateStatus::Pending,
    };

    Ok(NewEstimate {
        estimate_no: payload.estimate_no,
        date: payload.date,
        order_no: payload.order_no.unwrap_or_default(),
        customer_name: payload.customer_name,
        assigned_agent: payload.assigned_agent,
        status,
        total_amount: payload.total_amount,
        created_by: payload.created_by.unwrap_or(1),
        products: payload.products,
    })
}

/// Get all estimates with their line items, optionally narrowed to one
/// status
pub async fn get_estimates(
    State(state): State<AppState>,
    Query(query): Query<EstimateListQuery>,
) -> Result<impl IntoResponse> {
    let estimates = match query.status.as_deref() {
        Some(value) => {
            let status = parse_status(value)?;
            state.estimate_store.get_estimates_by_status(status).await?
        }
        None => state.estimate_store.get_estimates().await?,
    };
    Ok((StatusCode::OK, Json(estimates)))
}

/// Get estimate by ID handler
pub async fn get_estimate_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let estimate = state
        .estimate_store
        .get_estimate_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Estimate"))?;
    Ok((StatusCode::OK, Json(estimate)))
}

/// Create an estimate with its line items
pub async fn create_estimate(
    State(state): State<AppState>,
    Json(payload): Json<EstimatePayload>,
) -> Result<impl IntoResponse> {
    let new_estimate = validate_payload(payload)?;
    let estimate = state.estimate_store.add_estimate(new_estimate).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "id": estimate.estimate.id })),
    ))
}

/// Replace an estimate's fields and its full line-item set
pub async fn update_estimate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<EstimatePayload>,
) -> Result<impl IntoResponse> {
    let new_estimate = validate_payload(payload)?;
    state
        .estimate_store
        .update_estimate(id, new_estimate)
        .await?
        .ok_or(AppError::NotFound("Estimate"))?;

    Ok((StatusCode::OK, Json(json!({ "success": true, "id": id }))))
}

/// Set an estimate's status; values outside {pending, packed} are
/// rejected with a 400 before reaching storage
pub async fn update_estimate_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<StatusUpdate>,
) -> Result<impl IntoResponse> {
    let status = parse_status(&update.status)?;

    if !state
        .estimate_store
        .update_estimate_status(id, status)
        .await?
    {
        return Err(AppError::NotFound("Estimate"));
    }

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "id": id, "status": status })),
    ))
}

/// Delete estimate handler
pub async fn delete_estimate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    if !state.estimate_store.delete_estimate(id).await? {
        return Err(AppError::NotFound("Estimate"));
    }
    Ok(StatusCode::NO_CONTENT)
}
