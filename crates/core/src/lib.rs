//! Core types for the bookmarks service.
//!
//! Pure data types, key scheme, value encoding and the adapter traits the
//! caching layer is written against. Nothing in this crate performs I/O.

pub mod bookmark;
pub mod cache;
pub mod service;
pub mod storage;
