//! Per-install defaults for captcha issuance

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Default captcha expiry in minutes
pub const DEFAULT_EXPIRES_MINUTES: i64 = 30;

/// Default resend cooldown in seconds
pub const DEFAULT_INTERVAL_SECONDS: i64 = 60;

/// Default per-recipient daily send cap (0 disables the cap)
pub const DEFAULT_DAILY_CAP: i64 = 10;

/// Default generated code length
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Defaults applied by `CaptchaService::issue` when the caller does not
/// supply per-attempt values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptchaConfig {
    /// Default SMS template identifier; required by `issue`
    #[serde(default)]
    pub template_id: String,
    /// Minutes before a stored code expires
    pub expires_minutes: i64,
    /// Minimum seconds between sends for the same (recipient, scene)
    pub interval_seconds: i64,
    /// Per-recipient-per-scene daily send cap; 0 disables
    pub daily_cap: i64,
    /// Generated code length in digits
    pub code_length: usize,
    /// Prefix applied to every captcha cache key
    #[serde(default)]
    pub key_prefix: String,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            template_id: String::new(),
            expires_minutes: DEFAULT_EXPIRES_MINUTES,
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            daily_cap: DEFAULT_DAILY_CAP,
            code_length: DEFAULT_CODE_LENGTH,
            key_prefix: String::new(),
        }
    }
}

impl CaptchaConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(template_id) = std::env::var("CAPTCHA_TEMPLATE_ID") {
            config.template_id = template_id;
        }
        if let Ok(v) = std::env::var("CAPTCHA_EXPIRES_MINUTES") {
            config.expires_minutes = parse_i64(&v, "expires_minutes")?;
        }
        if let Ok(v) = std::env::var("CAPTCHA_INTERVAL_SECONDS") {
            config.interval_seconds = parse_i64(&v, "interval_seconds")?;
        }
        if let Ok(v) = std::env::var("CAPTCHA_DAILY_CAP") {
            config.daily_cap = parse_i64(&v, "daily_cap")?;
        }
        if let Ok(prefix) = std::env::var("REDIS_KEY_PREFIX") {
            config.key_prefix = prefix;
        }
        Ok(config)
    }

    /// Set the default template identifier
    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = template_id.into();
        self
    }

    /// Set the cache key prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }
}

fn parse_i64(value: &str, setting: &'static str) -> Result<i64, ConfigError> {
    value.parse::<i64>().map_err(|e| ConfigError::Invalid {
        setting,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = CaptchaConfig::default();
        assert_eq!(config.expires_minutes, 30);
        assert_eq!(config.interval_seconds, 60);
        assert_eq!(config.daily_cap, 10);
        assert_eq!(config.code_length, 6);
        assert!(config.template_id.is_empty());
    }

    #[test]
    fn test_builders() {
        let config = CaptchaConfig::default()
            .with_template("T100")
            .with_prefix("app:");
        assert_eq!(config.template_id, "T100");
        assert_eq!(config.key_prefix, "app:");
    }
}
