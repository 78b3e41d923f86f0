//! # Infrastructure layer
//!
//! Concrete collaborators for the captcha core:
//! - **Cache**: Redis-backed [`cl_core::store::CaptchaStore`]
//! - **Gateway**: Cloopen template-SMS client implementing
//!   [`cl_core::gateway::SmsGateway`]

pub mod cache;
pub mod gateway;

pub use cache::RedisStore;
pub use gateway::{CloopenGateway, ErrorCatalog, OutcomeClass};

use cl_shared::config::{CacheConfig, CaptchaConfig, ConfigError, GatewayConfig};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ConfigError> for InfrastructureError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

/// Complete client configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gateway account settings
    pub gateway: GatewayConfig,
    /// Redis cache settings
    pub cache: CacheConfig,
    /// Captcha issuance defaults
    pub captcha: CaptchaConfig,
}

/// Load the full client configuration from environment variables
///
/// Reads a `.env` file if one is present. Missing gateway settings are
/// configuration errors here, before any cache or gateway call.
pub fn load_config() -> Result<ClientConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    Ok(ClientConfig {
        gateway: GatewayConfig::from_env()?,
        cache: CacheConfig::from_env()?,
        captcha: CaptchaConfig::from_env()?,
    })
}
