//! Cache-aside bookmark service.
//!
//! [`CachedBookmarkService`] implements [`BookmarkService`] on top of any
//! [`BookmarkRepository`] and [`Cache`] pair. List misses are filled in the
//! background through a [`CacheFiller`].
//!
//! [`BookmarkService`]: bookmarks_core::service::BookmarkService
//! [`BookmarkRepository`]: bookmarks_core::storage::BookmarkRepository
//! [`Cache`]: bookmarks_core::cache::Cache

mod cached;
mod filler;

pub use cached::CachedBookmarkService;
pub use filler::CacheFiller;
