//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::auth::{login, register};
use super::handlers::{health_handler, AppState};
use super::products::{add_product, delete_product, get_product, get_products, update_product};
use super::users::{delete_user, get_user, get_users};
use crate::middleware::{cache_response, CacheLayer};

/// Mount point of the product routes
pub const PRODUCTS_PATH: &str = "/api/products";

/// Mount point of the user routes
pub const USERS_PATH: &str = "/api/users";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/register`, `POST /api/login`
/// - `GET|POST /api/products`, `GET|PUT|DELETE /api/products/:id`
/// - `GET /api/users`, `GET|DELETE /api/users/:id`
/// - `GET /health`
///
/// # Middleware
/// - Response cache on the product and user groups (GET only)
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cache_layer =
        CacheLayer::new(state.cache.clone()).with_expiration(state.cache_expiration);

    let products = Router::new()
        .route("/", get(get_products).post(add_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route_layer(middleware::from_fn_with_state(
            cache_layer.clone(),
            cache_response,
        ));

    let users = Router::new()
        .route("/", get(get_users))
        .route("/:id", get(get_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(cache_layer, cache_response));

    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .nest(PRODUCTS_PATH, products)
        .nest(USERS_PATH, users)
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
