//! Cache-aside coordinator over a durable bookmark store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use bookmarks_core::bookmark::{
    validate_fields, Bookmark, BookmarkId, CreateBookmarkRequest, EditBookmarkRequest, OwnerId,
};
use bookmarks_core::cache::{
    bookmark_key, deserialize_bookmark, owner_bookmarks_pattern, serialize_bookmark, Cache,
};
use bookmarks_core::service::{BookmarkService, Result, ServiceError};
use bookmarks_core::storage::{BookmarkRepository, RepositoryError};

use super::CacheFiller;

/// Bookmark service implementing the cache-aside pattern.
///
/// - **Reads**: check the cache first. A single-record miss is filled
///   inline; a list miss is filled in the background.
/// - **Writes**: persist to the repository, then overwrite the cache
///   entry. Deletes invalidate the cache entry before touching the store.
///
/// Ownership is always checked against the repository, never against a
/// cached value, on writes and on single-record misses.
///
/// Edits and deletes fence the owner's background fills, so a list
/// snapshot read before the write is never written to the cache after it.
///
/// # Type Parameters
///
/// * `R` - The durable store
/// * `C` - The cache implementation
pub struct CachedBookmarkService<R, C>
where
    R: BookmarkRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
    filler: CacheFiller<C>,
}

impl<R, C> CachedBookmarkService<R, C>
where
    R: BookmarkRepository,
    C: Cache + 'static,
{
    /// Creates a new cached bookmark service.
    ///
    /// # Arguments
    ///
    /// * `repository` - The durable store, source of truth for ownership
    /// * `cache` - The cache implementation
    /// * `ttl` - Time-to-live for every cache entry written
    /// * `fill_concurrency` - Maximum number of background list fills in flight
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration, fill_concurrency: usize) -> Self {
        let filler = CacheFiller::new(Arc::clone(&cache), ttl, fill_concurrency);
        Self {
            repository,
            cache,
            ttl,
            filler,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Waits for background cache fills to finish.
    pub async fn settle(&self) {
        self.filler.settle().await;
    }

    /// Best-effort write of one bookmark under its owner's key.
    async fn write_through(&self, bookmark: &Bookmark) {
        let key = bookmark_key(bookmark.user_id, bookmark.id);
        let bytes = match serialize_bookmark(bookmark) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(%key, error = %err, "Failed to serialize bookmark for cache");
                return;
            }
        };
        if let Err(err) = self.cache.set(&key, &bytes, Some(self.ttl)).await {
            tracing::warn!(%key, error = %err, "Failed to cache bookmark");
        }
    }

    /// Reads an owner's bookmarks from the cache.
    ///
    /// Returns `None` whenever the store must be consulted instead: no keys,
    /// every value expired since enumeration, a cache failure, or an
    /// undecodable value.
    async fn list_from_cache(&self, owner_id: OwnerId) -> Option<Vec<Bookmark>> {
        let pattern = owner_bookmarks_pattern(owner_id);

        let keys = match self.cache.keys_matching(&pattern).await {
            Ok(keys) if keys.is_empty() => return None,
            Ok(keys) => keys,
            Err(err) => {
                tracing::warn!(%owner_id, error = %err, "Cache key scan failed, falling back to store");
                return None;
            }
        };

        let values = match self.cache.get_many(&keys).await {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!(%owner_id, error = %err, "Cache bulk read failed, falling back to store");
                return None;
            }
        };

        let mut bookmarks = Vec::with_capacity(values.len());
        for bytes in values.into_iter().flatten() {
            match deserialize_bookmark(&bytes) {
                Ok(bookmark) => bookmarks.push(bookmark),
                Err(err) => {
                    tracing::warn!(%owner_id, error = %err, "Cache entry deserialization failed");
                    return None;
                }
            }
        }

        if bookmarks.is_empty() {
            return None;
        }

        bookmarks.sort_by_key(|b| b.id);
        Some(bookmarks)
    }

    /// Fetches a bookmark for a write, failing with `Forbidden` unless
    /// `owner_id` owns it.
    async fn find_owned_for_write(
        &self,
        owner_id: OwnerId,
        bookmark_id: BookmarkId,
    ) -> Result<Bookmark> {
        self.repository
            .find_by_id(bookmark_id)
            .await?
            .filter(|b| b.is_owned_by(owner_id))
            .ok_or(ServiceError::Forbidden(bookmark_id))
    }
}

/// Maps a store failure during a write. A row that vanished after the
/// ownership check is reported like any other inaccessible bookmark.
fn write_error(bookmark_id: BookmarkId, err: RepositoryError) -> ServiceError {
    if err.is_not_found() {
        ServiceError::Forbidden(bookmark_id)
    } else {
        ServiceError::StoreUnavailable(err)
    }
}

#[async_trait]
impl<R, C> BookmarkService for CachedBookmarkService<R, C>
where
    R: BookmarkRepository + 'static,
    C: Cache + 'static,
{
    async fn list_bookmarks(&self, owner_id: OwnerId) -> Result<Vec<Bookmark>> {
        if let Some(bookmarks) = self.list_from_cache(owner_id).await {
            tracing::trace!(%owner_id, count = bookmarks.len(), "Cache hit for bookmark list");
            return Ok(bookmarks);
        }

        tracing::trace!(%owner_id, "Cache miss for bookmark list");
        let ticket = self.filler.ticket(owner_id).await;
        let bookmarks = self.repository.find_by_owner(owner_id).await?;

        self.filler.spawn_fill(ticket, bookmarks.clone());

        Ok(bookmarks)
    }

    async fn get_bookmark(&self, owner_id: OwnerId, bookmark_id: BookmarkId) -> Result<Bookmark> {
        let cache_key = bookmark_key(owner_id, bookmark_id);

        match self.cache.get(&cache_key).await {
            Ok(Some(bytes)) => match deserialize_bookmark(&bytes) {
                Ok(bookmark) => {
                    tracing::trace!(%owner_id, %bookmark_id, "Cache hit for bookmark");
                    return Ok(bookmark);
                }
                // Treat as a miss; the fill below overwrites it.
                Err(err) => {
                    tracing::warn!(%owner_id, %bookmark_id, error = %err, "Cache entry deserialization failed");
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(%owner_id, %bookmark_id, error = %err, "Cache read failed, falling back to store");
            }
        }

        tracing::trace!(%owner_id, %bookmark_id, "Cache miss for bookmark");
        let bookmark = self
            .repository
            .find_by_id(bookmark_id)
            .await?
            .filter(|b| b.is_owned_by(owner_id))
            .ok_or(ServiceError::NotFound(bookmark_id))?;

        self.write_through(&bookmark).await;

        Ok(bookmark)
    }

    async fn create_bookmark(
        &self,
        owner_id: OwnerId,
        request: CreateBookmarkRequest,
    ) -> Result<Bookmark> {
        let fields = request.into_fields();
        validate_fields(&fields)?;

        let bookmark = self.repository.insert(owner_id, &fields).await?;
        self.write_through(&bookmark).await;

        tracing::debug!(%owner_id, bookmark_id = %bookmark.id, "Bookmark created");
        Ok(bookmark)
    }

    async fn edit_bookmark(
        &self,
        owner_id: OwnerId,
        bookmark_id: BookmarkId,
        request: EditBookmarkRequest,
    ) -> Result<Bookmark> {
        let _fence = self.filler.fence(owner_id).await;
        let current = self.find_owned_for_write(owner_id, bookmark_id).await?;

        let mut fields = current.fields();
        request.apply_to(&mut fields);
        validate_fields(&fields)?;

        let bookmark = self
            .repository
            .update_by_id(bookmark_id, &fields)
            .await
            .map_err(|err| write_error(bookmark_id, err))?;
        self.write_through(&bookmark).await;

        tracing::debug!(%owner_id, %bookmark_id, "Bookmark updated");
        Ok(bookmark)
    }

    async fn delete_bookmark(&self, owner_id: OwnerId, bookmark_id: BookmarkId) -> Result<()> {
        // Pending list fills for this owner must not re-create the entry.
        let _fence = self.filler.fence(owner_id).await;
        self.find_owned_for_write(owner_id, bookmark_id).await?;

        // Invalidate before the store delete: a stale entry must not outlive the row.
        let cache_key = bookmark_key(owner_id, bookmark_id);
        if let Err(err) = self.cache.delete(&cache_key).await {
            tracing::warn!(%owner_id, %bookmark_id, error = %err, "Failed to invalidate bookmark cache, aborting delete");
            return Err(ServiceError::CacheDegraded(err));
        }

        self.repository
            .delete_by_id(bookmark_id)
            .await
            .map_err(|err| write_error(bookmark_id, err))?;

        tracing::debug!(%owner_id, %bookmark_id, "Bookmark deleted");
        Ok(())
    }
}
