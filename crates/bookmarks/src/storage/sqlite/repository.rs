//! SQLite repository implementation.
//!
//! Implements [`BookmarkRepository`] from `bookmarks_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::params;
use tokio_rusqlite::Connection;

use bookmarks_core::bookmark::{Bookmark, BookmarkFields, BookmarkId, OwnerId};
use bookmarks_core::storage::{BookmarkRepository, RepositoryError, Result};

use super::conversions::{format_datetime, row_to_bookmark};
use super::error::map_tokio_rusqlite_error;
use super::schema;

const ENTITY: &str = "Bookmark";

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// IDs come from `AUTOINCREMENT` and are never reused.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Removes every bookmark.
    pub async fn clear(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.execute(schema::DELETE_ALL_BOOKMARKS, [])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, "unknown"))
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl BookmarkRepository for SqliteRepository {
    async fn find_by_owner(&self, owner_id: OwnerId) -> Result<Vec<Bookmark>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_BOOKMARKS_BY_USER)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([owner_id.0], row_to_bookmark)
                    .map_err(wrap_err)?;

                let mut bookmarks = Vec::new();
                for row_result in rows {
                    bookmarks.push(row_result.map_err(wrap_err)?);
                }
                Ok(bookmarks)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, "unknown"))
    }

    async fn find_by_id(&self, id: BookmarkId) -> Result<Option<Bookmark>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_BOOKMARK_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([id.0], row_to_bookmark) {
                    Ok(bookmark) => Ok(Some(bookmark)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, id.to_string()))
    }

    async fn insert(&self, owner_id: OwnerId, fields: &BookmarkFields) -> Result<Bookmark> {
        let fields = fields.clone();
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                conn.query_row(
                    schema::INSERT_BOOKMARK,
                    params![
                        owner_id.0,
                        fields.title,
                        fields.description,
                        fields.link,
                        now
                    ],
                    row_to_bookmark,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, "unknown"))
    }

    async fn update_by_id(&self, id: BookmarkId, fields: &BookmarkFields) -> Result<Bookmark> {
        let fields = fields.clone();
        let now = format_datetime(&Utc::now());

        // A missing row surfaces as QueryReturnedNoRows and maps to NotFound.
        self.conn
            .call(move |conn| {
                conn.query_row(
                    schema::UPDATE_BOOKMARK,
                    params![id.0, fields.title, fields.description, fields.link, now],
                    row_to_bookmark,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, id.to_string()))
    }

    async fn delete_by_id(&self, id: BookmarkId) -> Result<()> {
        self.conn
            .call(move |conn| {
                let affected = conn
                    .execute(schema::DELETE_BOOKMARK, [id.0])
                    .map_err(wrap_err)?;
                if affected == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_db() -> SqliteRepository {
        SqliteRepository::new_in_memory()
            .await
            .expect("Failed to create in-memory database")
    }

    fn fields(title: &str) -> BookmarkFields {
        BookmarkFields::new(title, format!("https://{}.dev", title.to_lowercase()))
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let repo = setup_test_db().await;

        let created = repo
            .insert(OwnerId(1), &fields("A").with_description("first"))
            .await
            .unwrap();

        assert_eq!(created.user_id, OwnerId(1));
        assert_eq!(created.description.as_deref(), Some("first"));
        assert_eq!(created.created_at, created.updated_at);

        let fetched = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_find_by_id_missing_returns_none() {
        let repo = setup_test_db().await;
        assert_eq!(repo.find_by_id(BookmarkId(404)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_by_owner_filters_and_orders() {
        let repo = setup_test_db().await;
        let a = repo.insert(OwnerId(1), &fields("A")).await.unwrap();
        repo.insert(OwnerId(2), &fields("B")).await.unwrap();
        let c = repo.insert(OwnerId(1), &fields("C")).await.unwrap();

        let owned = repo.find_by_owner(OwnerId(1)).await.unwrap();
        assert_eq!(owned, vec![a, c]);
        assert!(repo.find_by_owner(OwnerId(3)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repo = setup_test_db().await;
        let created = repo
            .insert(OwnerId(1), &fields("A").with_description("old"))
            .await
            .unwrap();

        let updated = repo
            .update_by_id(created.id, &fields("A2"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "A2");
        assert!(updated.description.is_none());
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(repo.find_by_id(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = setup_test_db().await;
        let err = repo
            .update_by_id(BookmarkId(7), &fields("X"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RepositoryError::NotFound {
                entity_type: "Bookmark",
                id: "7".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = setup_test_db().await;
        let created = repo.insert(OwnerId(1), &fields("A")).await.unwrap();

        repo.delete_by_id(created.id).await.unwrap();
        assert_eq!(repo.find_by_id(created.id).await.unwrap(), None);

        let err = repo.delete_by_id(created.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_clear() {
        let repo = setup_test_db().await;
        let first = repo.insert(OwnerId(1), &fields("A")).await.unwrap();
        repo.clear().await.unwrap();

        let next = repo.insert(OwnerId(1), &fields("B")).await.unwrap();
        assert!(next.id > first.id);
        assert_eq!(repo.find_by_owner(OwnerId(1)).await.unwrap(), vec![next]);
    }
}
