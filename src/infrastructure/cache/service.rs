//! Cache contract shared by every backend.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// String key/value store with per-entry expiry.
///
/// Values are opaque to the cache; callers store JSON. Backends report
/// failures as [`CacheError`] and leave it to the caller to decide whether a
/// failure matters. `WeatherService` treats every cache error as a miss.
///
/// Backends: [`RedisCache`](super::RedisCache), [`MemoryCache`](super::MemoryCache)
/// and [`NullCache`](super::NullCache).
#[async_trait]
pub trait CacheService: Send + Sync {
    /// `Ok(None)` on miss or after expiry.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` for `ttl_seconds`, or the backend default when `None`.
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Deletes `key`. Deleting a missing key is not an error.
    async fn invalidate(&self, key: &str) -> CacheResult<()>;

    async fn health_check(&self) -> bool;

    /// Short backend name used in health reports.
    fn backend_name(&self) -> &'static str;
}
