//! Key-value store abstraction backing the method handlers.
//!
//! The handlers depend on storage only through the [`Store`] trait, which
//! separates two access patterns:
//!
//! - [`Store::get`] is a hard lookup: a missing key is an error the caller
//!   must deal with (interests for an unknown client).
//! - [`Store::cache_get`] / [`Store::cache_set`] are best-effort: a miss is
//!   a valid outcome and writes never fail the request (score caching).
//!
//! Implementations must be safe for concurrent use; one store handle is
//! shared by every in-flight request.

mod memory;

pub use memory::{MemoryStore, DEFAULT_STORE_CAPACITY};

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Read/write access to the key-value backing store.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch a value, failing with [`StoreError::MissingKey`] if the key is
    /// not set (or has expired).
    async fn get(&self, key: &str) -> Result<Value, StoreError>;

    /// Fetch a cached value; `None` covers both absence and expiry.
    async fn cache_get(&self, key: &str) -> Option<Value>;

    /// Store a value for `ttl`. Best-effort: failures are the
    /// implementation's concern, never the caller's.
    async fn cache_set(&self, key: &str, value: Value, ttl: Duration);
}
