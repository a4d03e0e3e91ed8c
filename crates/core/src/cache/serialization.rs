//! Pure functions for serializing bookmarks to and from cache bytes.
//!
//! Values are stored as JSON so cache contents stay readable with
//! `redis-cli GET`.

use thiserror::Error;

use crate::bookmark::Bookmark;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a bookmark to JSON bytes.
pub fn serialize_bookmark(bookmark: &Bookmark) -> Result<Vec<u8>> {
    serde_json::to_vec(bookmark).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a bookmark.
pub fn deserialize_bookmark(bytes: &[u8]) -> Result<Bookmark> {
    serde_json::from_slice(bytes)
        .map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
