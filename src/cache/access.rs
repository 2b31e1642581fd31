//! Cache Access Layer
//!
//! Thin wrapper over the key-value store that turns every store failure
//! into a safe default. Caching is an optimization; a broken store must
//! never fail a request.

use std::sync::Arc;

use tracing::{debug, error};

use crate::store::KvStore;

// == Response Cache ==
/// Fault-tolerant handle to the response cache.
///
/// Holds nothing but the shared store client, so clones are cheap and
/// every request sees the same backend.
#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<dyn KvStore>,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates a cache layer over the given store client.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    // == Get ==
    /// Returns the cached value for `key`.
    ///
    /// Fails open: a store error is logged and reported as a miss.
    pub async fn get(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(err) => {
                error!(key, error = %err, "Error getting cache");
                None
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key`.
    ///
    /// With a non-zero `ttl_secs` the entry expires after that many seconds;
    /// otherwise it persists until deleted. Errors are logged and dropped.
    pub async fn set(&self, key: &str, value: &str, ttl_secs: Option<u64>) {
        let result = match ttl_secs {
            Some(ttl) if ttl > 0 => self.store.set_ex(key, value, ttl).await,
            _ => self.store.set(key, value).await,
        };

        match result {
            Ok(()) => debug!(key, ?ttl_secs, "Cached value"),
            Err(err) => error!(key, error = %err, "Error setting cache"),
        }
    }

    // == Delete ==
    /// Removes a single key. Errors are logged and dropped.
    pub async fn delete(&self, key: &str) {
        if let Err(err) = self.store.del(&[key.to_string()]).await {
            error!(key, error = %err, "Error deleting cache");
        }
    }

    // == Delete Pattern ==
    /// Removes every key matching the glob `pattern` in one batch.
    ///
    /// A pattern matching nothing is a no-op. Errors are logged and dropped.
    pub async fn delete_pattern(&self, pattern: &str) {
        let keys = match self.store.keys(pattern).await {
            Ok(keys) => keys,
            Err(err) => {
                error!(pattern, error = %err, "Error deleting cache pattern");
                return;
            }
        };

        if keys.is_empty() {
            return;
        }

        match self.store.del(&keys).await {
            Ok(removed) => debug!(pattern, removed, "Invalidated cached responses"),
            Err(err) => error!(pattern, error = %err, "Error deleting cache pattern"),
        }
    }

    // == Exists ==
    /// Returns true if `key` is present and unexpired; false on error.
    pub async fn exists(&self, key: &str) -> bool {
        match self.store.exists(key).await {
            Ok(exists) => exists,
            Err(err) => {
                error!(key, error = %err, "Error checking cache existence");
                false
            }
        }
    }
}
