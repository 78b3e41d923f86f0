//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Redis cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Logical database number (0-15)
    #[serde(default)]
    pub database: u8,

    /// Prefix applied to every captcha cache key
    #[serde(default)]
    pub key_prefix: String,

    /// Maximum connect attempts before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between connect attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            database: 0,
            key_prefix: String::new(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let database = match std::env::var("REDIS_DATABASE") {
            Ok(v) => v.parse::<u8>().map_err(|e| ConfigError::Invalid {
                setting: "database",
                reason: e.to_string(),
            })?,
            Err(_) => 0,
        };
        let key_prefix = std::env::var("REDIS_KEY_PREFIX").unwrap_or_default();

        Ok(Self {
            url,
            database,
            key_prefix,
            ..Default::default()
        })
    }

    /// Set the key prefix for all captcha cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Set the database number
    pub fn with_database(mut self, db: u8) -> Self {
        self.database = db.min(15);
        self
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}
