//! Request types for bookmark operations.
//!
//! Pure data types shared by the request layer and the service. Deserialized
//! requests are validated by the service before any I/O.

use serde::{Deserialize, Serialize};

use super::types::BookmarkFields;

/// Request payload for creating a bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookmarkRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub link: String,
}

impl CreateBookmarkRequest {
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

    /// Converts the request into the field set handed to the durable store.
    pub fn into_fields(self) -> BookmarkFields {
        BookmarkFields {
            title: self.title,
            description: self.description,
            link: self.link,
        }
    }
}

/// Request payload for editing a bookmark. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditBookmarkRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl EditBookmarkRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Apply the present fields to an existing field set.
    ///
    /// A blank `description` removes the description.
    pub fn apply_to(self, fields: &mut BookmarkFields) {
        if let Some(title) = self.title {
            fields.title = title;
        }
        if let Some(description) = self.description {
            fields.description = (!description.trim().is_empty()).then_some(description);
        }
        if let Some(link) = self.link {
            fields.link = link;
        }
    }
}
