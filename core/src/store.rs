//! Shared cache collaborator interface
//!
//! All coordination state (verification entries, interval locks, daily
//! counters) lives in the external store; the controller holds no
//! in-process locks.

use async_trait::async_trait;
use thiserror::Error;

/// Opaque failure from the cache store
#[derive(Error, Debug, Clone)]
#[error("Cache operation failed: {message} | 缓存操作失败: {message}")]
pub struct CacheError {
    pub message: String,
}

impl CacheError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Trait for the shared cache store backing captcha state
///
/// ## Absence sentinel contract
///
/// [`ttl`](Self::ttl) returns `Ok(None)` if and only if the key does
/// not exist. A present key returns `Ok(Some(seconds))`; a key stored
/// without an expiry reports `Ok(Some(-1))`. Every implementation and
/// every caller follows this one contract — presence of an interval
/// lock is decided by `ttl(..)?.is_some()` alone.
#[async_trait]
pub trait CaptchaStore: Send + Sync {
    /// Fetch a value; `None` when the key is absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value with a TTL in seconds
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: i64,
    ) -> Result<(), CacheError>;

    /// Delete a key; returns whether it existed
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Remaining TTL of a key; see the absence sentinel contract above
    async fn ttl(&self, key: &str) -> Result<Option<i64>, CacheError>;

    /// Atomically increment an integer counter, returning the new value
    async fn increment(&self, key: &str) -> Result<i64, CacheError>;

    /// Set a TTL on an existing key; returns whether the key existed
    async fn expire(&self, key: &str, ttl_seconds: i64) -> Result<bool, CacheError>;

    /// Atomically delete the key only if its value equals `expected`
    ///
    /// Returns `true` when the value matched and the key was removed.
    /// This is the single-use guarantee for verification entries: two
    /// concurrent checks with the same code cannot both succeed.
    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool, CacheError>;
}
