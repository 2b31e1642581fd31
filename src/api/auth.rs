//! Auth Handlers
//!
//! Registration and login. Both answer with the user and a fresh token.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::api::handlers::AppState;
use crate::api::routes::USERS_PATH;
use crate::auth::{hash_password, verify_password};
use crate::cache::path_pattern;
use crate::error::{ApiError, Result};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User, DEFAULT_ROLE};

/// Handler for POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let email = req.email.trim().to_lowercase();
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        username: req.username.trim().to_string(),
        email,
        password_hash: hash_password(&req.password).await?,
        role: DEFAULT_ROLE.to_string(),
        age: req.age,
        created_at: now,
        updated_at: now,
    };

    let user = state.users.create(user).await?;
    state.cache.delete_pattern(&path_pattern(USERS_PATH)).await;

    let token = state.tokens.issue(&user)?;
    info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

/// Handler for POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&req.password, &user.password_hash).await? {
        return Err(invalid());
    }

    let token = state.tokens.issue(&user)?;
    Ok(Json(AuthResponse { user, token }))
}
