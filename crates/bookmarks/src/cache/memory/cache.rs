//! In-memory cache implementation with LRU eviction.
//!
//! Provides a thread-safe in-memory cache with TTL support using tokio
//! synchronization primitives and an LRU eviction policy.
//!
//! Bookmark keys are tracked per owner so that enumerating one owner's keys
//! does not walk the whole store. Keys evicted by the LRU policy may linger in
//! the tracking sets; they are pruned the next time that owner is enumerated.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use bookmarks_core::bookmark::OwnerId;
use bookmarks_core::cache::{
    extract_owner_id_from_key, extract_owner_id_from_pattern, pattern_matches, Cache, Result,
};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// A TTL too large to represent as an `Instant` never expires.
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.and_then(|d| Instant::now().checked_add(d));
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() >= exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<LruCache>>` for concurrent access.
/// Expired entries are treated as absent and removed lazily on access.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    /// Maps owner_id -> bookmark keys written for that owner.
    tracking: Arc<RwLock<HashMap<OwnerId, HashSet<String>>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache holding at most `max_entries` values.
    ///
    /// A `max_entries` of 0 is treated as 1.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            tracking: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of stored entries, including expired ones not yet pruned.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn untrack(&self, key: &str) {
        let Some(owner_id) = extract_owner_id_from_key(key) else {
            return;
        };
        let keys = [key.to_string()];
        self.untrack_owner_keys(owner_id, &keys).await;
    }

    /// Drops `keys` from the owner's tracking set.
    ///
    /// Runs under the tracking lock and skips keys that are back in the
    /// store, so a concurrent `set` of the same key stays tracked.
    async fn untrack_owner_keys(&self, owner_id: OwnerId, keys: &[String]) {
        let mut tracking = self.tracking.write().await;
        let Some(tracked) = tracking.get_mut(&owner_id) else {
            return;
        };
        {
            let store = self.store.read().await;
            for key in keys {
                if !store.contains(key) {
                    tracked.remove(key);
                }
            }
        }
        if tracked.is_empty() {
            tracking.remove(&owner_id);
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // `LruCache::get` updates recency, so it needs the write lock.
        let mut store = self.store.write().await;

        let expired = match store.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            store.pop(key);
            drop(store);
            self.untrack(key).await;
        }
        Ok(None)
    }

    async fn get_many(&self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>> {
        let mut store = self.store.write().await;

        Ok(keys
            .iter()
            .map(|key| match store.get(key) {
                Some(entry) if !entry.is_expired() => Some(entry.value.clone()),
                _ => None,
            })
            .collect())
    }

    async fn keys_matching(&self, pattern: &str) -> Result<Vec<String>> {
        let Some(owner_id) = extract_owner_id_from_pattern(pattern) else {
            // Not an owner pattern - fall back to full iteration
            let store = self.store.read().await;
            return Ok(store
                .iter()
                .filter(|(key, entry)| !entry.is_expired() && pattern_matches(pattern, key))
                .map(|(key, _)| key.clone())
                .collect());
        };

        let tracked: Vec<String> = {
            let tracking = self.tracking.read().await;
            tracking
                .get(&owner_id)
                .map(|keys| keys.iter().cloned().collect())
                .unwrap_or_default()
        };
        if tracked.is_empty() {
            return Ok(Vec::new());
        }

        let mut live = Vec::with_capacity(tracked.len());
        let mut stale = Vec::new();
        {
            let mut store = self.store.write().await;
            for key in tracked {
                // `peek` so that enumeration does not count as use for LRU purposes.
                match store.peek(&key) {
                    Some(entry) if !entry.is_expired() => {
                        if pattern_matches(pattern, &key) {
                            live.push(key);
                        }
                    }
                    Some(_) => {
                        store.pop(&key);
                        stale.push(key);
                    }
                    None => stale.push(key),
                }
            }
        }

        if !stale.is_empty() {
            self.untrack_owner_keys(owner_id, &stale).await;
        }

        Ok(live)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        {
            let mut store = self.store.write().await;
            store.put(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
        }

        if let Some(owner_id) = extract_owner_id_from_key(key) {
            let mut tracking = self.tracking.write().await;
            tracking
                .entry(owner_id)
                .or_default()
                .insert(key.to_string());
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.write().await.pop(key);
        self.untrack(key).await;
        Ok(())
    }
}
