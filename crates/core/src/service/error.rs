use thiserror::Error;

use crate::bookmark::{BookmarkError, BookmarkId};
use crate::cache::CacheError;
use crate::storage::RepositoryError;

/// Errors surfaced by the bookmark service to its callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The bookmark does not exist, or belongs to someone else. Returned by
    /// reads so another owner's bookmark is indistinguishable from a missing one.
    #[error("Bookmark {0} not found")]
    NotFound(BookmarkId),
    /// The bookmark does not exist, or belongs to someone else. Returned by writes.
    #[error("Access to bookmark {0} denied")]
    Forbidden(BookmarkId),
    #[error("Invalid bookmark: {0}")]
    InvalidInput(#[from] BookmarkError),
    #[error("Durable store unavailable: {0}")]
    StoreUnavailable(#[from] RepositoryError),
    #[error("Cache degraded: {0}")]
    CacheDegraded(#[from] CacheError),
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
