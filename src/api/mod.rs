//! API Module
//!
//! HTTP handlers and routing for the REST API.
//!
//! # Endpoints
//! - `POST /api/register` - Create an account
//! - `POST /api/login` - Exchange credentials for a token
//! - `/api/products` - Product CRUD (GET responses cached)
//! - `/api/users` - User listing and removal (GET responses cached)
//! - `GET /health` - Health check endpoint

pub mod auth;
pub mod handlers;
pub mod products;
pub mod routes;
pub mod users;

pub use handlers::{health_handler, AppState};
pub use routes::{create_router, PRODUCTS_PATH, USERS_PATH};
