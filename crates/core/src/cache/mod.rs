//! Cache key scheme, value encoding and the cache adapter trait.

mod error;
mod keys;
mod patterns;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    bookmark_key, extract_owner_id_from_key, extract_owner_id_from_pattern,
    owner_bookmarks_pattern,
};
pub use patterns::pattern_matches;
pub use serialization::{deserialize_bookmark, serialize_bookmark, SerializationError};
pub use traits::Cache;
