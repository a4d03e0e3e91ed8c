use async_trait::async_trait;

use crate::bookmark::{Bookmark, BookmarkId, CreateBookmarkRequest, EditBookmarkRequest, OwnerId};

use super::Result;

/// Owner-scoped bookmark operations exposed to the request layer.
///
/// `owner_id` is always the authenticated caller.
#[async_trait]
pub trait BookmarkService: Send + Sync {
    /// Lists every bookmark of `owner_id`. Order is unspecified.
    async fn list_bookmarks(&self, owner_id: OwnerId) -> Result<Vec<Bookmark>>;

    /// Gets one bookmark of `owner_id`, or `ServiceError::NotFound`.
    async fn get_bookmark(&self, owner_id: OwnerId, bookmark_id: BookmarkId) -> Result<Bookmark>;

    /// Creates a bookmark owned by `owner_id`.
    async fn create_bookmark(
        &self,
        owner_id: OwnerId,
        request: CreateBookmarkRequest,
    ) -> Result<Bookmark>;

    /// Edits a bookmark of `owner_id`, or fails with `ServiceError::Forbidden`.
    async fn edit_bookmark(
        &self,
        owner_id: OwnerId,
        bookmark_id: BookmarkId,
        request: EditBookmarkRequest,
    ) -> Result<Bookmark>;

    /// Deletes a bookmark of `owner_id`, or fails with `ServiceError::Forbidden`.
    async fn delete_bookmark(&self, owner_id: OwnerId, bookmark_id: BookmarkId) -> Result<()>;
}
