//! Configuration types for the captcha library
//!
//! All configuration is validated once, at construction. A missing or
//! malformed setting is a [`ConfigError`] there and then, never a
//! runtime surprise on the send path.

pub mod cache;
pub mod captcha;
pub mod gateway;

pub use cache::CacheConfig;
pub use captcha::CaptchaConfig;
pub use gateway::GatewayConfig;

use thiserror::Error;

/// Errors raised while building configuration values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting: {0} | 缺少必需配置项: {0}")]
    Missing(&'static str),

    #[error("Invalid setting {setting}: {reason} | 配置项{setting}无效: {reason}")]
    Invalid {
        setting: &'static str,
        reason: String,
    },
}

/// Read a required environment variable, mapping absence to the setting name
pub(crate) fn require_env(var: &str, setting: &'static str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::Missing(setting))
}
