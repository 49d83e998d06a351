//! Bounded in-memory store with per-entry TTL.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::StoreError;

use super::Store;

/// Default maximum number of entries.
pub const DEFAULT_STORE_CAPACITY: usize = 10_000;

struct Entry {
    value: Value,
    expires_at: Instant,
}

/// In-memory [`Store`] with LRU eviction and per-entry expiry.
///
/// Entries past their TTL are dropped lazily on access. The store is safe to
/// share across tasks via `Arc`.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use scoring_api::store::{MemoryStore, Store};
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() {
///     let store = MemoryStore::new();
///     store
///         .cache_set("i:1001", json!(["books", "tv"]), Duration::from_secs(3600))
///         .await;
///     assert_eq!(store.get("i:1001").await.unwrap(), json!(["books", "tv"]));
/// }
/// ```
pub struct MemoryStore {
    entries: Mutex<LruCache<String, Entry>>,
}

impl MemoryStore {
    /// Create a store with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_STORE_CAPACITY)
    }

    /// Create a store bounded to `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity.max(1)).unwrap(),
            )),
        }
    }

    async fn get_live(&self, key: &str) -> Option<Value> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        None
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Value, StoreError> {
        self.get_live(key)
            .await
            .ok_or_else(|| StoreError::MissingKey(key.to_string()))
    }

    async fn cache_get(&self, key: &str) -> Option<Value> {
        self.get_live(key).await
    }

    async fn cache_set(&self, key: &str, value: Value, ttl: Duration) {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().await.put(key.to_string(), entry);
    }
}

// =============================================================================
// Tests
// =============================================================================
