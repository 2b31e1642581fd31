//! Store doubles shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::store::{KvStore, MemoryStore};

/// Store whose every call fails as if the server were down.
#[derive(Debug, Default)]
pub struct FailingStore;

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("connection refused".to_string()))
}

#[async_trait]
impl KvStore for FailingStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        down()
    }
    async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        down()
    }
    async fn set_ex(&self, _key: &str, _value: &str, _ttl_secs: u64) -> StoreResult<()> {
        down()
    }
    async fn del(&self, _keys: &[String]) -> StoreResult<u64> {
        down()
    }
    async fn keys(&self, _pattern: &str) -> StoreResult<Vec<String>> {
        down()
    }
    async fn exists(&self, _key: &str) -> StoreResult<bool> {
        down()
    }
}

/// Call counters recorded by [`CountingStore`].
#[derive(Debug, Default)]
pub struct Calls {
    pub get: AtomicUsize,
    pub set: AtomicUsize,
    pub set_ex: AtomicUsize,
    pub del: AtomicUsize,
    pub keys: AtomicUsize,
}

impl Calls {
    pub fn gets(&self) -> usize {
        self.get.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.set.load(Ordering::SeqCst) + self.set_ex.load(Ordering::SeqCst)
    }
}

/// In-memory store that counts calls and can delay writes.
#[derive(Debug, Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    pub calls: Arc<Calls>,
    pub write_delay: Option<Duration>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_write_delay(delay: Duration) -> Self {
        Self {
            write_delay: Some(delay),
            ..Self::default()
        }
    }

    async fn pause(&self) {
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl KvStore for CountingStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.calls.get.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }
    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.calls.set.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.inner.set(key, value).await
    }
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> StoreResult<()> {
        self.calls.set_ex.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.inner.set_ex(key, value, ttl_secs).await
    }
    async fn del(&self, keys: &[String]) -> StoreResult<u64> {
        self.calls.del.fetch_add(1, Ordering::SeqCst);
        self.inner.del(keys).await
    }
    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        self.calls.keys.fetch_add(1, Ordering::SeqCst);
        self.inner.keys(pattern).await
    }
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        self.inner.exists(key).await
    }
}
