//! Background cache population for list misses.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedRwLockWriteGuard, RwLock, Semaphore};
use tokio::task::JoinHandle;

use bookmarks_core::bookmark::{Bookmark, OwnerId};
use bookmarks_core::cache::{bookmark_key, serialize_bookmark, Cache};

/// Write generation of one owner's bookmarks.
///
/// Fills hold the read side while they write to the cache. Edits and
/// deletes hold the write side, bumped, while they touch the store and the
/// cache.
type Generation = Arc<RwLock<u64>>;

/// An owner's generation as observed before a list read the store.
///
/// A fill carrying a ticket from an older generation is dropped, so a
/// snapshot taken before an edit or delete never reaches the cache.
pub struct FillTicket {
    owner_id: OwnerId,
    generation: u64,
    lock: Generation,
}

/// Spawns best-effort cache fills with bounded concurrency.
///
/// Each fill holds one semaphore permit for its whole lifetime. When no
/// permit is free the fill is skipped; the next list miss for that owner
/// tries again.
pub struct CacheFiller<C: Cache> {
    cache: Arc<C>,
    ttl: Duration,
    permits: Arc<Semaphore>,
    max_in_flight: u32,
    generations: Mutex<HashMap<OwnerId, Generation>>,
}

impl<C: Cache + 'static> CacheFiller<C> {
    /// Creates a filler allowing at most `max_in_flight` concurrent fills.
    ///
    /// A `max_in_flight` of 0 is treated as 1.
    pub fn new(cache: Arc<C>, ttl: Duration, max_in_flight: usize) -> Self {
        let max_in_flight = u32::try_from(max_in_flight.max(1)).unwrap_or(u32::MAX);
        Self {
            cache,
            ttl,
            permits: Arc::new(Semaphore::new(max_in_flight as usize)),
            max_in_flight,
            generations: Mutex::new(HashMap::new()),
        }
    }

    /// Number of fills that could start right now.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    async fn generation(&self, owner_id: OwnerId) -> Generation {
        let mut generations = self.generations.lock().await;
        Arc::clone(generations.entry(owner_id).or_default())
    }

    /// Records the owner's current generation. Take it before reading the
    /// store, then hand it to [`spawn_fill`](Self::spawn_fill).
    pub async fn ticket(&self, owner_id: OwnerId) -> FillTicket {
        let lock = self.generation(owner_id).await;
        let generation = *lock.read().await;
        FillTicket {
            owner_id,
            generation,
            lock,
        }
    }

    /// Starts a new generation for `owner_id` and blocks fills until the
    /// returned guard is dropped.
    ///
    /// Waits for the owner's in-flight fills to finish. Tickets issued
    /// before the fence are invalidated.
    pub async fn fence(&self, owner_id: OwnerId) -> OwnedRwLockWriteGuard<u64> {
        let mut guard = self.generation(owner_id).await.write_owned().await;
        *guard = guard.wrapping_add(1);
        guard
    }

    /// Writes `bookmarks` to the cache in a background task.
    ///
    /// Returns `None` if there is nothing to write or the filler is saturated.
    pub fn spawn_fill(&self, ticket: FillTicket, bookmarks: Vec<Bookmark>) -> Option<JoinHandle<()>> {
        let owner_id = ticket.owner_id;
        if bookmarks.is_empty() {
            return None;
        }

        let Ok(permit) = Arc::clone(&self.permits).try_acquire_owned() else {
            tracing::debug!(%owner_id, count = bookmarks.len(), "Cache fill skipped, filler saturated");
            return None;
        };

        let cache = Arc::clone(&self.cache);
        let ttl = self.ttl;

        Some(tokio::spawn(async move {
            let _permit = permit;

            let current = ticket.lock.read().await;
            if *current != ticket.generation {
                tracing::debug!(%owner_id, "Cache fill dropped, bookmarks changed since the read");
                return;
            }

            let mut written = 0usize;
            for bookmark in &bookmarks {
                let key = bookmark_key(owner_id, bookmark.id);
                let bytes = match serialize_bookmark(bookmark) {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        tracing::warn!(%key, error = %err, "Failed to serialize bookmark for cache fill");
                        continue;
                    }
                };
                match cache.set(&key, &bytes, Some(ttl)).await {
                    Ok(()) => written += 1,
                    Err(err) => {
                        tracing::warn!(%key, error = %err, "Cache fill write failed");
                    }
                }
            }

            tracing::debug!(%owner_id, written, total = bookmarks.len(), "Cache fill finished");
        }))
    }

    /// Waits until every in-flight fill has finished.
    pub async fn settle(&self) {
        // Holding every permit at once means no fill is running.
        let _all = self.permits.acquire_many(self.max_in_flight).await;
    }
}
