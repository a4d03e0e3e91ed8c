mod error;
mod operations;
mod requests;
mod types;

pub use error::BookmarkError;
pub use operations::{validate_fields, MAX_LINK_LEN, MAX_TITLE_LEN};
pub use requests::{CreateBookmarkRequest, EditBookmarkRequest};
pub use types::{Bookmark, BookmarkFields, BookmarkId, OwnerId};
