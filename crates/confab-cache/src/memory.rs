//! In-process cache store.
//!
//! Best-effort secondary store used when Redis is disabled and as the test
//! double for the cache facade. Entries expire lazily: expiry is checked at
//! read time, and expired entries are dropped on the next read or write.

use crate::store::CacheStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use confab_core::ConfabResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    stored_at: DateTime<Utc>,
    ttl_seconds: u64,
}

impl MemoryEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.stored_at);
        age.num_seconds() >= self.ttl_seconds as i64
    }
}

/// In-memory cache store backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, MemoryEntry>>,
}

impl MemoryCacheStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.entries
            .read()
            .values()
            .filter(|e| !e.is_expired(now))
            .count()
    }

    /// True when the store holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops the entry only if it is still expired as of `now`.
    ///
    /// The expiry check is repeated under the write lock: a writer may have
    /// replaced the entry between a reader observing it expired and the
    /// cleanup acquiring the lock, and that fresh entry must survive.
    fn remove_if_expired(&self, key: &str, now: DateTime<Utc>) {
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
        }
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> ConfabResult<Option<String>> {
        let now = Utc::now();
        let expired = {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            self.remove_if_expired(key, now);
        }
        Ok(None)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> ConfabResult<()> {
        let entry = MemoryEntry {
            value: value.to_string(),
            stored_at: Utc::now(),
            ttl_seconds: ttl.as_secs().max(1),
        };
        self.entries.write().insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> ConfabResult<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> ConfabResult<bool> {
        Ok(self.get_raw(key).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = MemoryCacheStore::new();
        store
            .set_raw("k", "\"v\"", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.get_raw("k").await.unwrap().as_deref(), Some("\"v\""));
        assert!(store.delete("k").await.unwrap());
        assert!(!store.delete("k").await.unwrap());
        assert_eq!(store.get_raw("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entries_expire_after_ttl() {
        let store = MemoryCacheStore::new();
        store
            .set_raw("k", "\"v\"", Duration::from_secs(1))
            .await
            .unwrap();
        assert!(store.exists("k").await.unwrap());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(store.get_raw("k").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_expired_cleanup_spares_a_replacement_entry() {
        let store = MemoryCacheStore::new();

        // A reader observed the key expired at `observed_at`, then a writer
        // replaced the entry before the cleanup ran.
        let observed_at = Utc::now();
        store
            .set_raw("k", "\"fresh\"", Duration::from_secs(60))
            .await
            .unwrap();

        store.remove_if_expired("k", observed_at);
        assert_eq!(
            store.get_raw("k").await.unwrap().as_deref(),
            Some("\"fresh\"")
        );
    }

    #[tokio::test]
    async fn test_overwrite_is_last_writer_wins() {
        let store = MemoryCacheStore::new();
        store
            .set_raw("k", "\"old\"", Duration::from_secs(60))
            .await
            .unwrap();
        store
            .set_raw("k", "\"new\"", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            store.get_raw("k").await.unwrap().as_deref(),
            Some("\"new\"")
        );
        assert_eq!(store.len(), 1);
    }
}
