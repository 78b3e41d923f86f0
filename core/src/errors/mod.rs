//! Error taxonomy for captcha operations
//!
//! Every error is returned to the immediate caller of the captcha
//! service; there are no internal retries and no silent suppression.

use thiserror::Error;

use crate::gateway::ProviderOutcome;
use crate::store::CacheError;

/// Errors raised by the captcha controller
#[derive(Error, Debug)]
pub enum CaptchaError {
    /// A required request field or setting was not supplied
    #[error("Missing required field: {field} | 缺少必需字段: {field}")]
    Configuration { field: &'static str },

    /// Resend requested inside the cooldown window
    #[error("Captcha requested too frequently, retry in {retry_after_seconds} seconds | 短信验证码获取过于频繁，请{retry_after_seconds}秒后再试")]
    RateLimited { retry_after_seconds: i64 },

    /// Per-recipient daily send cap reached; resets at local midnight
    #[error("Daily captcha send cap of {cap} reached | 短信验证码获取次数已达每日上限{cap}次")]
    DailyCapReached { cap: i64 },

    /// The gateway rejected the dispatch or was unreachable
    ///
    /// Wraps the provider outcome so callers can decide whether the
    /// failure is worth retrying.
    #[error("SMS dispatch failed: {outcome} | 短信发送失败: {outcome}")]
    Dispatch { outcome: ProviderOutcome },

    /// The submitted code did not match or had expired
    ///
    /// Absence and mismatch surface identically so callers cannot probe
    /// whether a code was ever issued.
    #[error("Invalid or expired captcha | 验证码错误或已过期")]
    Validation,

    /// The cache store failed before dispatch
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Cache writes failed after a successful dispatch
    ///
    /// The message was already delivered and is not resent; the stored
    /// code may be unverifiable.
    #[error("Captcha delivered but could not be persisted: {message} | 验证码已发送但缓存写入失败: {message}")]
    Persistence { message: String },
}

impl CaptchaError {
    /// Whether waiting and retrying the same request can succeed
    pub fn is_rate_limit(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::DailyCapReached { .. }
        )
    }
}

pub type CaptchaResult<T> = Result<T, CaptchaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_classification() {
        assert!(CaptchaError::RateLimited {
            retry_after_seconds: 42
        }
        .is_rate_limit());
        assert!(CaptchaError::DailyCapReached { cap: 10 }.is_rate_limit());
        assert!(!CaptchaError::Validation.is_rate_limit());
    }

    #[test]
    fn test_rate_limited_message_carries_remaining_seconds() {
        let err = CaptchaError::RateLimited {
            retry_after_seconds: 57,
        };
        assert!(err.to_string().contains("57"));
    }

    #[test]
    fn test_cache_error_converts() {
        let err: CaptchaError = CacheError::new("boom").into();
        assert!(matches!(err, CaptchaError::Cache(_)));
    }
}
