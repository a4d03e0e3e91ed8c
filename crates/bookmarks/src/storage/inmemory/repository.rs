//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use bookmarks_core::bookmark::{Bookmark, BookmarkFields, BookmarkId, OwnerId};
use bookmarks_core::storage::{BookmarkRepository, RepositoryError, Result};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<BookmarkId, Bookmark>,
    last_id: i64,
}

/// In-memory storage backend.
///
/// IDs are assigned from a counter starting at 1 and are never reused, even
/// after a delete or [`clear`](Self::clear).
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every bookmark.
    pub async fn clear(&self) {
        self.table.write().await.rows.clear();
    }

    /// Returns the number of stored bookmarks.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn not_found(id: BookmarkId) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type: "Bookmark",
        id: id.to_string(),
    }
}

#[async_trait]
impl BookmarkRepository for InMemoryRepository {
    async fn find_by_owner(&self, owner_id: OwnerId) -> Result<Vec<Bookmark>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|b| b.is_owned_by(owner_id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: BookmarkId) -> Result<Option<Bookmark>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, owner_id: OwnerId, fields: &BookmarkFields) -> Result<Bookmark> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let now = Utc::now();
        let bookmark = Bookmark {
            id: BookmarkId(table.last_id),
            user_id: owner_id,
            title: fields.title.clone(),
            description: fields.description.clone(),
            link: fields.link.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(bookmark.id, bookmark.clone());
        Ok(bookmark)
    }

    async fn update_by_id(&self, id: BookmarkId, fields: &BookmarkFields) -> Result<Bookmark> {
        let mut table = self.table.write().await;
        let bookmark = table.rows.get_mut(&id).ok_or_else(|| not_found(id))?;
        bookmark.title = fields.title.clone();
        bookmark.description = fields.description.clone();
        bookmark.link = fields.link.clone();
        bookmark.updated_at = Utc::now();
        Ok(bookmark.clone())
    }

    async fn delete_by_id(&self, id: BookmarkId) -> Result<()> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or_else(|| not_found(id))
    }
}
