use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of the user that owns a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub i64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a bookmark, assigned by the durable store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkId(pub i64);

impl fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookmark as stored in the durable store.
///
/// `user_id` is fixed at creation. Only the durable store creates values of
/// this type; caches hold serialized snapshots of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub user_id: OwnerId,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bookmark {
    /// Returns true if this bookmark belongs to `owner_id`.
    pub fn is_owned_by(&self, owner_id: OwnerId) -> bool {
        self.user_id == owner_id
    }

    /// Returns the mutable fields of this bookmark.
    pub fn fields(&self) -> BookmarkFields {
        BookmarkFields {
            title: self.title.clone(),
            description: self.description.clone(),
            link: self.link.clone(),
        }
    }
}

/// The user-editable part of a bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkFields {
    pub title: String,
    pub description: Option<String>,
    pub link: String,
}

impl BookmarkFields {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            link: link.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Bookmark {
        let ts = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        Bookmark {
            id: BookmarkId(100),
            user_id: OwnerId(1),
            title: "Rust".to_string(),
            description: Some("The book".to_string()),
            link: "https://doc.rust-lang.org/book/".to_string(),
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_is_owned_by() {
        let bookmark = sample();
        assert!(bookmark.is_owned_by(OwnerId(1)));
        assert!(!bookmark.is_owned_by(OwnerId(2)));
    }

    #[test]
    fn test_fields_copies_mutable_part() {
        let fields = sample().fields();
        assert_eq!(fields.title, "Rust");
        assert_eq!(fields.description.as_deref(), Some("The book"));
        assert_eq!(fields.link, "https://doc.rust-lang.org/book/");
    }

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 100);
        assert_eq!(json["user_id"], 1);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(OwnerId(7).to_string(), "7");
        assert_eq!(BookmarkId(42).to_string(), "42");
    }
}
