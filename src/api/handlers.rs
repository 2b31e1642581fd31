//! API Handlers
//!
//! Shared application state and the service-level endpoints.

use std::sync::Arc;

use axum::{extract::FromRef, Json};

use crate::auth::TokenService;
use crate::cache::ResponseCache;
use crate::config::Config;
use crate::middleware::DEFAULT_EXPIRATION_SECS;
use crate::models::HealthResponse;
use crate::repository::{
    InMemoryProductRepository, InMemoryUserRepository, ProductRepository, UserRepository,
};
use crate::store::KvStore;

/// Application state shared across all handlers.
///
/// Every field is a cheap handle; cloning the state per request shares the
/// same repositories, cache store and signing keys.
#[derive(Clone)]
pub struct AppState {
    /// Product documents
    pub products: Arc<dyn ProductRepository>,
    /// User documents
    pub users: Arc<dyn UserRepository>,
    /// Response cache, also used for invalidation after writes
    pub cache: ResponseCache,
    /// Access token issuer/verifier
    pub tokens: TokenService,
    /// Lifetime of cached GET responses in seconds
    pub cache_expiration: u64,
}

impl AppState {
    /// Creates a new AppState with in-memory repositories over `store`.
    pub fn new(store: Arc<dyn KvStore>, tokens: TokenService) -> Self {
        Self {
            products: Arc::new(InMemoryProductRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            cache: ResponseCache::new(store),
            tokens,
            cache_expiration: DEFAULT_EXPIRATION_SECS,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config, store: Arc<dyn KvStore>) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.jwt_expires_in);
        Self::new(store, tokens).with_cache_expiration(config.cache_expiration)
    }

    /// Overrides the lifetime of cached responses.
    pub fn with_cache_expiration(mut self, secs: u64) -> Self {
        self.cache_expiration = secs;
        self
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
