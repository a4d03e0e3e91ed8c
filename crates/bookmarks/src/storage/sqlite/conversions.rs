//! SQLite row conversion functions.

use bookmarks_core::bookmark::{Bookmark, BookmarkId, OwnerId};
use chrono::{DateTime, Utc};
use rusqlite::Row;

/// Convert a SQLite row to a Bookmark.
///
/// Expected columns: id, user_id, title, description, link, created_at, updated_at
pub fn row_to_bookmark(row: &Row) -> rusqlite::Result<Bookmark> {
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;

    Ok(Bookmark {
        id: BookmarkId(row.get(0)?),
        user_id: OwnerId(row.get(1)?),
        title: row.get(2)?,
        description: row.get(3)?,
        link: row.get(4)?,
        created_at: parse_datetime(5, &created_at)?,
        updated_at: parse_datetime(6, &updated_at)?,
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Format a DateTime for SQLite storage (RFC 3339, full precision).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
