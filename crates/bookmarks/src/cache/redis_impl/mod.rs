//! Redis cache backend implementation.
//!
//! Provides a shared cache for multi-instance deployments using a Redis
//! connection manager.

mod cache;
mod error;

pub use cache::RedisCache;
