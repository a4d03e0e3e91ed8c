//! In-memory storage backend.
//!
//! Stores all bookmarks in a `BTreeMap` wrapped in `Arc<RwLock<_>>`.
//! Data is not persisted and is lost when the last clone is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookmarks::storage::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
