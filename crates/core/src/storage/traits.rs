use async_trait::async_trait;

use crate::bookmark::{Bookmark, BookmarkFields, BookmarkId, OwnerId};

use super::Result;

/// Durable store for bookmarks. The source of truth for existence and
/// ownership.
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Gets every bookmark owned by `owner_id`, ordered by ID.
    async fn find_by_owner(&self, owner_id: OwnerId) -> Result<Vec<Bookmark>>;

    /// Gets a bookmark by its ID, regardless of owner.
    async fn find_by_id(&self, id: BookmarkId) -> Result<Option<Bookmark>>;

    /// Inserts a new bookmark and returns it with its assigned ID and timestamps.
    async fn insert(&self, owner_id: OwnerId, fields: &BookmarkFields) -> Result<Bookmark>;

    /// Replaces the mutable fields of a bookmark and returns the stored result.
    ///
    /// Fails with `RepositoryError::NotFound` if the bookmark does not exist.
    async fn update_by_id(&self, id: BookmarkId, fields: &BookmarkFields) -> Result<Bookmark>;

    /// Deletes a bookmark by its ID.
    ///
    /// Fails with `RepositoryError::NotFound` if the bookmark does not exist.
    async fn delete_by_id(&self, id: BookmarkId) -> Result<()>;
}
