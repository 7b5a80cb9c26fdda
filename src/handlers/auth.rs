use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    error::Result,
    handlers::AppState,
    models::user::{LoginRequest, LoginResponse, UserDto},
};

/// Login handler. Verifies the supplied credentials against the stored
/// argon2 hash; a failed match is a normal response, not an error.
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_store
        .verify_credentials(&credentials.username, &credentials.password)
        .await?;

    let response = match user {
        Some(user) => LoginResponse::success(UserDto::from(user)),
        None => LoginResponse::failure(),
    };

    Ok(Json(response))
}
