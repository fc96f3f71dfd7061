//! Caching layer for provider responses.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - Process-local cache with per-entry expiry
//! - [`NullCache`] - No-op implementation for disabled caching
//!
//! Keys are built with [`keys`] so that reads, writes, and invalidations
//! always agree on the same key for a query.

pub mod keys;
mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};
