//! Backend wiring.
//!
//! The storage backend is chosen by the `sqlite` feature (in-memory
//! otherwise) and the cache backend by `memory` / `redis`.

use std::sync::Arc;

use crate::config::Config;
use crate::service::CachedBookmarkService;

#[cfg(feature = "memory")]
use crate::cache::MemoryCache;
#[cfg(feature = "redis")]
use crate::cache::RedisCache;
#[cfg(not(feature = "sqlite"))]
use crate::storage::InMemoryRepository;
#[cfg(feature = "sqlite")]
use crate::storage::SqliteRepository;

#[cfg(not(feature = "sqlite"))]
pub type ActiveRepository = InMemoryRepository;
#[cfg(feature = "sqlite")]
pub type ActiveRepository = SqliteRepository;

#[cfg(feature = "memory")]
pub type ActiveCache = MemoryCache;
#[cfg(feature = "redis")]
pub type ActiveCache = RedisCache;

/// The bookmark service over the compiled-in backends.
pub type AppService = CachedBookmarkService<ActiveRepository, ActiveCache>;

#[cfg(not(feature = "sqlite"))]
async fn build_repository(_config: &Config) -> anyhow::Result<ActiveRepository> {
    tracing::info!("Using in-memory storage");
    Ok(InMemoryRepository::new())
}

#[cfg(feature = "sqlite")]
async fn build_repository(config: &Config) -> anyhow::Result<ActiveRepository> {
    tracing::info!(path = %config.sqlite_path, "Using SQLite storage");
    Ok(SqliteRepository::new(&config.sqlite_path).await?)
}

#[cfg(feature = "memory")]
async fn build_cache(config: &Config) -> anyhow::Result<ActiveCache> {
    tracing::info!(max_entries = config.cache_max_entries, "Using in-memory cache");
    Ok(MemoryCache::new(config.cache_max_entries))
}

#[cfg(feature = "redis")]
async fn build_cache(config: &Config) -> anyhow::Result<ActiveCache> {
    tracing::info!(url = %config.redis_url, "Using Redis cache");
    Ok(RedisCache::new(&config.redis_url).await?)
}

/// Connects the configured backends and builds the service.
pub async fn build_service(config: &Config) -> anyhow::Result<AppService> {
    let repository = Arc::new(build_repository(config).await?);
    let cache = Arc::new(build_cache(config).await?);

    tracing::debug!(
        ttl_seconds = config.cache_ttl_seconds,
        fill_concurrency = config.cache_fill_concurrency,
        "Bookmark service ready"
    );

    Ok(CachedBookmarkService::new(
        repository,
        cache,
        config.cache_ttl(),
        config.cache_fill_concurrency,
    ))
}

#[cfg(all(test, feature = "memory", not(feature = "sqlite")))]
mod tests {
    use super::*;
    use bookmarks_core::bookmark::{CreateBookmarkRequest, OwnerId};
    use bookmarks_core::service::BookmarkService;

    #[tokio::test]
    async fn test_build_service_with_defaults() {
        let service = build_service(&Config::default()).await.unwrap();
        assert_eq!(service.ttl(), std::time::Duration::from_secs(15));

        let created = service
            .create_bookmark(OwnerId(1), CreateBookmarkRequest::new("A", "https://a.dev"))
            .await
            .unwrap();
        let listed = service.list_bookmarks(OwnerId(1)).await.unwrap();
        assert_eq!(listed, vec![created]);
    }
}
