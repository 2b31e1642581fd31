//! Product API - a REST backend for products and users
//!
//! CRUD endpoints over a document store, fronted by a read-through
//! response cache backed by Redis or an in-process store.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use cache::ResponseCache;
pub use config::Config;
pub use middleware::{cache_response, CacheLayer};
pub use store::{KvStore, MemoryStore, RedisStore};
pub use tasks::spawn_cleanup_task;
