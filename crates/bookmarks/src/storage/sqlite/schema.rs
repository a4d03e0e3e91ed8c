//! SQLite schema definitions and SQL query constants.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS bookmarks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    link TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_bookmarks_user_id ON bookmarks(user_id);
"#;

pub const INSERT_BOOKMARK: &str = r#"
INSERT INTO bookmarks (user_id, title, description, link, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?5)
RETURNING id, user_id, title, description, link, created_at, updated_at
"#;

pub const SELECT_BOOKMARK_BY_ID: &str = r#"
SELECT id, user_id, title, description, link, created_at, updated_at
FROM bookmarks
WHERE id = ?1
"#;

pub const SELECT_BOOKMARKS_BY_USER: &str = r#"
SELECT id, user_id, title, description, link, created_at, updated_at
FROM bookmarks
WHERE user_id = ?1
ORDER BY id ASC
"#;

pub const UPDATE_BOOKMARK: &str = r#"
UPDATE bookmarks
SET title = ?2, description = ?3, link = ?4, updated_at = ?5
WHERE id = ?1
RETURNING id, user_id, title, description, link, created_at, updated_at
"#;

pub const DELETE_BOOKMARK: &str = r#"
DELETE FROM bookmarks
WHERE id = ?1
"#;

pub const DELETE_ALL_BOOKMARKS: &str = "DELETE FROM bookmarks";
