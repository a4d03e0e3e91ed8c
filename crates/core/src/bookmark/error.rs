use thiserror::Error;

/// Errors that can occur when validating bookmark fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookmarkError {
    #[error("Bookmark title cannot be empty")]
    EmptyTitle,
    #[error("Bookmark title too long (max 200 characters)")]
    TitleTooLong,
    #[error("Bookmark link cannot be empty")]
    EmptyLink,
    #[error("Bookmark link too long (max 2048 characters)")]
    LinkTooLong,
}
