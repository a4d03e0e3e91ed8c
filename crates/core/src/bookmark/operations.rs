use super::error::BookmarkError;
use super::types::BookmarkFields;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_LINK_LEN: usize = 2048;

/// Validates bookmark fields before they reach the durable store.
pub fn validate_fields(fields: &BookmarkFields) -> Result<(), BookmarkError> {
    if fields.title.trim().is_empty() {
        return Err(BookmarkError::EmptyTitle);
    }
    if fields.title.chars().count() > MAX_TITLE_LEN {
        return Err(BookmarkError::TitleTooLong);
    }
    if fields.link.trim().is_empty() {
        return Err(BookmarkError::EmptyLink);
    }
    if fields.link.len() > MAX_LINK_LEN {
        return Err(BookmarkError::LinkTooLong);
    }
    Ok(())
}
