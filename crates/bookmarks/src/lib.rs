//! Cache-aside access layer for per-owner bookmarks.
//!
//! Backends live in [`cache`] and [`storage`]; [`service`] ties them
//! together and [`app`] wires the ones selected by cargo features.

pub mod app;
pub mod cache;
pub mod config;
pub mod service;
pub mod storage;

pub use config::Config;
pub use service::CachedBookmarkService;
