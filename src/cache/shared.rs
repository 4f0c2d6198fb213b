//! Shared Cache Handle
//!
//! One `CacheStore` per process, shared by request handlers behind a lock.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};

// == Shared Cache ==
/// Cloneable handle to the process-wide store.
///
/// Each call takes the lock for the duration of one store operation, so
/// get, set, delete and eviction never interleave across threads.
#[derive(Debug)]
pub struct SharedCache<V = Value> {
    inner: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> SharedCache<V> {
    /// Wraps a store for sharing.
    pub fn new(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn set(&self, key: impl Into<String>, value: V, ttl_seconds: i64) {
        self.inner.write().await.set(key, value, ttl_seconds);
    }

    pub async fn delete(&self, key_or_prefix: &str, is_prefix: bool) -> usize {
        self.inner.write().await.delete(key_or_prefix, is_prefix)
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }
}

impl<V: Clone> SharedCache<V> {
    /// Reads take the write lock since a hit bumps the entry's counter.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.write().await.get(key)
    }

    // == Cache Through ==
    /// Returns the cached value or runs `compute`, caches its output and returns it.
    ///
    /// No lock is held while `compute` runs. Two callers that miss on the
    /// same key at the same time will both compute, and the later `set` wins;
    /// in-flight computations are not coalesced.
    ///
    /// A failed `compute` caches nothing and its error is returned unchanged.
    pub async fn cache_through<F, Fut, E>(
        &self,
        key: &str,
        ttl_seconds: i64,
        compute: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            return Ok(value);
        }

        debug!(key, "cache miss, computing");
        let value = compute().await?;
        self.set(key, value.clone(), ttl_seconds).await;
        Ok(value)
    }
}
