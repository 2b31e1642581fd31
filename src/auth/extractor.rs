//! Bearer-token extractor for protected handlers.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use crate::auth::{Claims, TokenService};
use crate::error::ApiError;

/// The caller identified by a valid `Authorization: Bearer` token.
///
/// Adding this extractor to a handler makes the route require login.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    TokenService: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Not authorized, no token".to_string()))?;

        let tokens = TokenService::from_ref(state);
        tokens.verify(token).map(AuthUser)
    }
}
