//! Cloopen gateway account configuration

use serde::{Deserialize, Serialize};

use super::{require_env, ConfigError};

/// Immutable account bundle for the Cloopen SMS gateway
///
/// Every field is required and checked once at construction; the send
/// path can rely on a `GatewayConfig` being complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Gateway host (IP or domain name)
    pub server_ip: String,
    /// Gateway HTTPS port
    pub server_port: u16,
    /// Gateway protocol version segment, e.g. "2013-12-26"
    pub soft_version: String,
    /// Main account identifier
    pub account_sid: String,
    /// Main account secret token; never logged
    pub account_token: String,
    /// Application identifier
    pub app_id: String,
    /// Emit the serialized request body to the log before transmission
    pub enable_log: bool,
}

impl GatewayConfig {
    /// Build and validate a gateway configuration
    pub fn new(
        server_ip: impl Into<String>,
        server_port: u16,
        soft_version: impl Into<String>,
        account_sid: impl Into<String>,
        account_token: impl Into<String>,
        app_id: impl Into<String>,
        enable_log: bool,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            server_ip: server_ip.into(),
            server_port,
            soft_version: soft_version.into(),
            account_sid: account_sid.into(),
            account_token: account_token.into(),
            app_id: app_id.into(),
            enable_log,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = require_env("CLOOPEN_SERVER_PORT", "server_port")?
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid {
                setting: "server_port",
                reason: e.to_string(),
            })?;
        let enable_log = std::env::var("CLOOPEN_ENABLE_LOG")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self::new(
            require_env("CLOOPEN_SERVER_IP", "server_ip")?,
            server_port,
            require_env("CLOOPEN_SOFT_VERSION", "soft_version")?,
            require_env("CLOOPEN_ACCOUNT_SID", "account_sid")?,
            require_env("CLOOPEN_ACCOUNT_TOKEN", "account_token")?,
            require_env("CLOOPEN_APP_ID", "app_id")?,
            enable_log,
        )
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server_ip.is_empty() {
            return Err(ConfigError::Missing("server_ip"));
        }
        if self.server_port == 0 {
            return Err(ConfigError::Invalid {
                setting: "server_port",
                reason: "port must be non-zero".to_string(),
            });
        }
        if self.soft_version.is_empty() {
            return Err(ConfigError::Missing("soft_version"));
        }
        if self.account_sid.is_empty() {
            return Err(ConfigError::Missing("account_sid"));
        }
        if self.account_token.is_empty() {
            return Err(ConfigError::Missing("account_token"));
        }
        if self.app_id.is_empty() {
            return Err(ConfigError::Missing("app_id"));
        }
        Ok(())
    }
}
