//! Middleware Module
//!
//! Request interceptors applied ahead of route handlers.
//!
//! # Middleware
//! - Response cache: read-through caching of JSON GET responses

pub mod cache;

pub use cache::{cache_response, CacheLayer, DEFAULT_EXPIRATION_SECS};
