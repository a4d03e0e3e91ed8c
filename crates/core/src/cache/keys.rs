use crate::bookmark::{BookmarkId, OwnerId};

const BOOKMARK_PREFIX: &str = "bookmark:";

/// Returns the cache key for a single bookmark.
///
/// Injective over `(owner_id, bookmark_id)`: both segments are integers, so
/// the `:` separator can never appear inside either of them.
pub fn bookmark_key(owner_id: OwnerId, bookmark_id: BookmarkId) -> String {
    format!("{BOOKMARK_PREFIX}{owner_id}:{bookmark_id}")
}

/// Returns the pattern matching every bookmark key of one owner.
///
/// The trailing `:` before the wildcard keeps `bookmark:1:*` from matching
/// keys of owner `12`.
pub fn owner_bookmarks_pattern(owner_id: OwnerId) -> String {
    format!("{BOOKMARK_PREFIX}{owner_id}:*")
}

/// Extracts the owner ID from a bookmark cache key, if present.
///
/// # Examples
///
/// ```
/// use bookmarks_core::bookmark::{BookmarkId, OwnerId};
/// use bookmarks_core::cache::{bookmark_key, extract_owner_id_from_key};
///
/// let key = bookmark_key(OwnerId(1), BookmarkId(100));
/// assert_eq!(extract_owner_id_from_key(&key), Some(OwnerId(1)));
/// assert_eq!(extract_owner_id_from_key("user:1"), None);
/// ```
pub fn extract_owner_id_from_key(key: &str) -> Option<OwnerId> {
    let rest = key.strip_prefix(BOOKMARK_PREFIX)?;
    let (owner, id) = rest.split_once(':')?;
    id.parse::<i64>().ok()?;
    owner.parse().ok().map(OwnerId)
}

/// Extracts the owner ID from an owner pattern, if present.
///
/// Returns `None` when the owner position holds a wildcard.
pub fn extract_owner_id_from_pattern(pattern: &str) -> Option<OwnerId> {
    let rest = pattern.strip_prefix(BOOKMARK_PREFIX)?;
    let (owner, _) = rest.split_once(':')?;
    owner.parse().ok().map(OwnerId)
}
