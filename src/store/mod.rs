//! Key-Value Store Module
//!
//! Client abstraction over the external key-value store backing the
//! response cache, with Redis and in-process implementations.

mod entry;
mod memory;
mod pattern;
mod redis_store;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

use crate::error::StoreResult;

// Re-export public types
pub use entry::{current_timestamp_ms, StoreEntry};
pub use memory::MemoryStore;
pub use pattern::glob_match;
pub use redis_store::RedisStore;

// == Key-Value Store ==
/// String-keyed, string-valued store with optional per-key expiry.
///
/// Mirrors the subset of the Redis command set the cache relies on. Every
/// call may fail with a [`StoreError`](crate::error::StoreError); callers
/// decide how to degrade.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// `GET key`
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// `SET key value`, no expiry
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// `SETEX key ttl value`
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> StoreResult<()>;

    /// `DEL key...`, returns how many keys were removed
    async fn del(&self, keys: &[String]) -> StoreResult<u64>;

    /// `KEYS pattern` with glob semantics
    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>>;

    /// `EXISTS key`
    async fn exists(&self, key: &str) -> StoreResult<bool>;
}
