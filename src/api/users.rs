//! User Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::api::handlers::AppState;
use crate::api::routes::USERS_PATH;
use crate::auth::AuthUser;
use crate::cache::path_pattern;
use crate::error::{ApiError, Result};
use crate::models::{MessageResponse, User};

fn not_found() -> ApiError {
    ApiError::NotFound("User not found".to_string())
}

/// Handler for GET /api/users
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.users.find_all().await?))
}

/// Handler for GET /api/users/:id
pub async fn get_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<User>> {
    state
        .users
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// Handler for DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>> {
    if !state.users.delete(id).await? {
        return Err(not_found());
    }
    state.cache.delete_pattern(&path_pattern(USERS_PATH)).await;

    Ok(Json(MessageResponse::new("User deleted")))
}
