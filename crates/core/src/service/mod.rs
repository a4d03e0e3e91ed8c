mod error;
mod traits;

pub use error::{Result, ServiceError};
pub use traits::BookmarkService;
