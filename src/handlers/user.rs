use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::{AppError, Result},
    handlers::AppState,
    models::user::{NewUser, UserChanges, UserDto},
};

/// Get all users handler
pub async fn get_all_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.user_store.get_all_users().await?;
    let user_dtos: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
    Ok((StatusCode::OK, Json(user_dtos)))
}

/// Get user by ID handler
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_store
        .get_user_by_id(id)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    Ok((StatusCode::OK, Json(UserDto::from(user))))
}

/// Create user handler
pub async fn create_user(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> Result<impl IntoResponse> {
    if new_user.username.is_empty() || new_user.password.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".into()));
    }

    let user = state.user_store.create_user(new_user).await?;
    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

/// Update user handler
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(changes): Json<UserChanges>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_store
        .update_user(id, changes)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    Ok((StatusCode::OK, Json(UserDto::from(user))))
}

/// Delete user handler
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    if !state.user_store.delete_user(id).await? {
        return Err(AppError::NotFound("User"));
    }
    Ok(StatusCode::NO_CONTENT)
}
