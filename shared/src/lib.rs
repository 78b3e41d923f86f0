//! Shared configuration types and utilities for the Cloopen SMS captcha library
//!
//! This crate provides common functionality used by the core and
//! infrastructure layers:
//! - Configuration types (gateway account, cache, captcha defaults)
//! - Utility functions (phone validation and masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{CacheConfig, CaptchaConfig, ConfigError, GatewayConfig};
pub use utils::phone;
