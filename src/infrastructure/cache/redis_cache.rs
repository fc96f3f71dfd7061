//! Redis cache backend.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use tracing::{debug, info};

/// Namespace for every key this service writes, so a shared Redis stays tidy.
const KEY_PREFIX: &str = "weather:";

/// Cache backed by Redis `SET EX` / `GET` / `DEL`.
///
/// Holds a [`ConnectionManager`], which reconnects on its own after the server
/// goes away; cloning it per call is cheap.
pub struct RedisCache {
    conn: ConnectionManager,
    default_ttl: u64,
}

fn op_error(op: &str, key: &str, e: RedisError) -> CacheError {
    CacheError::OperationError(format!("{op} {key}: {e}"))
}

impl RedisCache {
    /// Opens a managed connection and checks it with `PING`.
    ///
    /// `default_ttl_seconds` applies to [`CacheService::set`] calls without an
    /// explicit TTL.
    ///
    /// # Errors
    ///
    /// [`CacheError::ConnectionError`] if the URL is invalid or Redis does not answer.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let conn = Client::open(redis_url)
            .map_err(|e| CacheError::ConnectionError(format!("invalid Redis URL: {e}")))?
            .get_connection_manager()
            .await
            .map_err(|e| CacheError::ConnectionError(e.to_string()))?;

        let cache = Self {
            conn,
            default_ttl: default_ttl_seconds,
        };
        if !cache.health_check().await {
            return Err(CacheError::ConnectionError("PING failed".to_string()));
        }

        info!("Connected to Redis");
        Ok(cache)
    }

    fn namespaced(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let value: Option<String> = self
            .conn
            .clone()
            .get(Self::namespaced(key))
            .await
            .map_err(|e| op_error("GET", key, e))?;

        debug!(
            "Cache {}: {}",
            if value.is_some() { "HIT" } else { "MISS" },
            key
        );
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()> {
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        self.conn
            .clone()
            .set_ex::<_, _, ()>(Self::namespaced(key), value, ttl)
            .await
            .map_err(|e| op_error("SET", key, e))?;

        debug!("Cache SET: {} (TTL: {}s)", key, ttl);
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<()> {
        let removed: u32 = self
            .conn
            .clone()
            .del(Self::namespaced(key))
            .await
            .map_err(|e| op_error("DEL", key, e))?;

        if removed > 0 {
            debug!("Cache INVALIDATE: {}", key);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.conn.clone().ping::<()>().await.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
