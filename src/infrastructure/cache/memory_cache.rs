//! In-process cache with per-entry expiry.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

struct Entry {
    value: String,
    expires_at: Instant,
}

/// Process-local cache used when Redis is not configured or unreachable.
///
/// Entries expire `ttl` seconds after they are written. Expired entries are
/// dropped lazily on lookup and swept whenever a new value is stored.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    default_ttl: u64,
}

impl MemoryCache {
    /// Creates an empty cache with the given default TTL in seconds.
    pub fn new(default_ttl_seconds: u64) -> Self {
        debug!("Using MemoryCache (TTL: {}s)", default_ttl_seconds);
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl: default_ttl_seconds,
        }
    }

    /// Number of stored entries, including ones that expired but were not yet swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();

        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => {
                    debug!("Cache HIT: {}", key);
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
                None => {
                    debug!("Cache MISS: {}", key);
                    return Ok(None);
                }
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| e.expires_at <= now) {
            entries.remove(key);
        }
        debug!("Cache EXPIRED: {}", key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()> {
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);
        let now = Instant::now();

        let mut entries = self.entries.write().await;
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + Duration::from_secs(ttl),
            },
        );

        debug!("Cache SET: {} (TTL: {}s)", key, ttl);
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<()> {
        if self.entries.write().await.remove(key).is_some() {
            debug!("Cache INVALIDATE: {}", key);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
