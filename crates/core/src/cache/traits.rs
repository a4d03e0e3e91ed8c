use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Key-value cache with per-key expiry and pattern enumeration.
///
/// Implementations enforce expiry themselves: a key whose TTL has lapsed
/// must behave exactly like an absent key in every method.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Gets several values at once. The result has one slot per requested
    /// key, in request order; absent or expired keys yield `None`.
    async fn get_many(&self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>>;

    /// Lists the live keys matching a glob pattern (e.g. `"bookmark:1:*"`).
    /// Order is unspecified.
    async fn keys_matching(&self, pattern: &str) -> Result<Vec<String>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;
}
