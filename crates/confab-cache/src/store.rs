//! Cache store trait for abstracted key-value operations.

use confab_core::ConfabResult;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Key-value cache store addressed by structured string keys.
///
/// Implementations must provide atomic per-key get/set/delete; every write
/// is a last-writer-wins overwrite. Values are JSON strings to keep the
/// trait dyn-compatible.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> ConfabResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> ConfabResult<()>;

    /// Delete a value from the cache. Deleting an absent key is a no-op.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> ConfabResult<bool>;

    /// Check if a key exists in the cache.
    async fn exists(&self, key: &str) -> ConfabResult<bool>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheStoreExt: CacheStore {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> ConfabResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> ConfabResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }

    /// Get a cached value, or load and cache it on a miss.
    ///
    /// A store read failure is degraded to a miss so a cache outage never
    /// takes down the read path. The loader is invoked at most once per
    /// call; on loader failure nothing is written and the error propagates
    /// unchanged. Cache write failures are logged and swallowed; the
    /// loaded value is still returned.
    ///
    /// No de-duplication of concurrent misses on the same key: loaders are
    /// idempotent reads against the backend.
    async fn get_or_set<T, F, Fut>(&self, key: &str, ttl: Duration, loader: F) -> ConfabResult<T>
    where
        T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: std::future::Future<Output = ConfabResult<T>> + Send,
    {
        match self.get::<T>(key).await {
            Ok(Some(cached)) => {
                debug!(key, "cache hit");
                return Ok(cached);
            }
            Ok(None) => debug!(key, "cache miss"),
            Err(e) => warn!(key, error = %e, "cache read failed, falling back to loader"),
        }

        let value = loader().await?;

        if let Err(e) = self.set(key, &value, ttl).await {
            warn!(key, error = %e, "cache write failed, returning uncached value");
        }

        Ok(value)
    }
}

// Blanket implementation for all CacheStore implementations
impl<T: CacheStore + ?Sized> CacheStoreExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryCacheStore;
    use confab_core::ConfabError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_get_or_set_invokes_loader_once_then_hits() {
        let store = MemoryCacheStore::new();
        let calls = AtomicUsize::new(0);

        let load = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["a".to_string(), "b".to_string()])
        };
        let first: Vec<String> = store.get_or_set("k", TTL, load).await.unwrap();

        let load = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["stale".to_string()])
        };
        let second: Vec<String> = store.get_or_set("k", TTL, load).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_loader_failure_writes_nothing() {
        let store = MemoryCacheStore::new();

        let result: ConfabResult<String> = store
            .get_or_set("k", TTL, || async {
                Err(ConfabError::backend("upstream down"))
            })
            .await;
        assert!(matches!(result, Err(ConfabError::Backend(_))));
        assert!(!store.exists("k").await.unwrap());

        // Next call must reach a (now healthy) loader.
        let value: String = store
            .get_or_set("k", TTL, || async { Ok("fresh".to_string()) })
            .await
            .unwrap();
        assert_eq!(value, "fresh");
    }

    #[tokio::test]
    async fn test_delete_forces_next_call_to_loader() {
        let store = MemoryCacheStore::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let _: u64 = store
                .get_or_set("k", TTL, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        store.delete("k").await.unwrap();

        let _: u64 = store
            .get_or_set("k", TTL, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(7)
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
