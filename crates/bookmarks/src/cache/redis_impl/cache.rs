//! Redis cache implementation.
//!
//! Expiry is delegated to Redis (`SET ... EX`). Key enumeration uses a
//! cursor-based `SCAN ... MATCH` loop so it never blocks the server the way
//! `KEYS` does; SCAN may report a key more than once, so results are
//! de-duplicated. Keys that expire between enumeration and `MGET` come back
//! as missing values, which callers must tolerate.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use bookmarks_core::cache::{Cache, Result};

use super::error::map_redis_error;

/// Number of keys Redis is asked to inspect per SCAN round-trip.
const SCAN_BATCH: usize = 256;

/// Redis cache backend using connection manager for pooling.
#[derive(Clone)]
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn get_many(&self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>> {
        // MGET with no keys is a syntax error
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn.clone();
        let values: Vec<Option<Vec<u8>>> = redis::cmd("MGET")
            .arg(keys)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(values)
    }

    async fn keys_matching(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(map_redis_error)?;

            for key in batch {
                if seen.insert(key.clone()) {
                    keys.push(key);
                }
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(keys)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(map_redis_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to get Redis URL from environment.
    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Skip test if Redis not available.
    async fn get_test_cache() -> Option<RedisCache> {
        let cache = RedisCache::new(&redis_url()).await.ok()?;
        // The connection manager connects lazily on some versions; probe it.
        cache.get("test:probe").await.ok()?;
        Some(cache)
    }

    /// Generate a unique key namespace to avoid conflicts between runs.
    fn test_namespace() -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        format!("test:redis_cache:{}:{}", std::process::id(), nanos)
    }

    #[tokio::test]
    async fn test_redis_set_and_get() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = format!("{}:set_get", test_namespace());
        cache.set(&key, b"hello world", None).await.unwrap();

        assert_eq!(cache.get(&key).await.unwrap(), Some(b"hello world".to_vec()));

        cache.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_delete() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = format!("{}:delete", test_namespace());
        cache.set(&key, b"to be deleted", None).await.unwrap();
        cache.delete(&key).await.unwrap();

        assert!(cache.get(&key).await.unwrap().is_none());
        // Deleting again is a no-op
        cache.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = format!("{}:ttl", test_namespace());
        cache
            .set(&key, b"expiring value", Some(Duration::from_secs(1)))
            .await
            .unwrap();
        assert!(cache.get(&key).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_get_many() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let ns = test_namespace();
        let a = format!("{ns}:a");
        let b = format!("{ns}:b");
        cache.set(&a, b"1", None).await.unwrap();

        let values = cache.get_many(&[a.clone(), b.clone()]).await.unwrap();
        assert_eq!(values, vec![Some(b"1".to_vec()), None]);
        assert!(cache.get_many(&[]).await.unwrap().is_empty());

        cache.delete(&a).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_keys_matching() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let ns = test_namespace();
        let mine = [format!("{ns}:1:1"), format!("{ns}:1:2")];
        let other = format!("{ns}:12:1");
        for key in mine.iter().chain(std::iter::once(&other)) {
            cache.set(key, b"v", None).await.unwrap();
        }

        let mut keys = cache.keys_matching(&format!("{ns}:1:*")).await.unwrap();
        keys.sort();
        assert_eq!(keys, mine.to_vec());

        for key in mine.iter().chain(std::iter::once(&other)) {
            cache.delete(key).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_redis_binary_data() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = format!("{}:binary", test_namespace());
        let value: Vec<u8> = (0..=255).collect();
        cache.set(&key, &value, None).await.unwrap();

        assert_eq!(cache.get(&key).await.unwrap(), Some(value));

        cache.delete(&key).await.unwrap();
    }
}
