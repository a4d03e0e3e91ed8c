//! Storage backend implementations.
//!
//! This module provides concrete implementations of the
//! [`BookmarkRepository`] trait defined in `bookmarks_core::storage`.
//!
//! # Feature Flags
//!
//! - `sqlite`: SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! The in-memory backend is always compiled; it backs the default binary and
//! the test suites.
//!
//! [`BookmarkRepository`]: bookmarks_core::storage::BookmarkRepository

pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
