use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{error::Result, handlers::AppState, models::report::SalesReportFilters};

/// Sales report handler; filters arrive as query parameters
pub async fn get_sales_report(
    State(state): State<AppState>,
    Query(filters): Query<SalesReportFilters>,
) -> Result<impl IntoResponse> {
    let report = state.report_store.get_sales_report(&filters).await?;
    Ok((StatusCode::OK, Json(report)))
}

/// Inventory report handler
pub async fn get_inventory_report(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let report = state.report_store.get_inventory_report().await?;
    Ok((StatusCode::OK, Json(report)))
}
