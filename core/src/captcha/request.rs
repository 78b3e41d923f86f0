//! Per-attempt captcha request values

use rand::{rngs::OsRng, RngCore};

use cl_shared::config::captcha::{
    DEFAULT_DAILY_CAP, DEFAULT_EXPIRES_MINUTES, DEFAULT_INTERVAL_SECONDS,
};

use crate::errors::{CaptchaError, CaptchaResult};

/// One captcha send attempt
///
/// Constructed per attempt and discarded after `send` completes; never
/// persisted and never shared. The `with_*` adapters consume the value,
/// so a request is fully formed before it reaches the service — there
/// is no partially-configured shared state.
#[derive(Debug, Clone)]
pub struct CaptchaRequest {
    /// Recipients; rate limiting applies per recipient regardless of
    /// batch size
    pub recipients: Vec<String>,
    /// Caller-chosen string separating verification contexts
    /// (e.g. "login" vs "register")
    pub scene: String,
    /// Gateway template identifier
    pub template_id: String,
    /// Code value to deliver and later verify
    pub code: String,
    /// Minutes before the stored code expires
    pub expires_minutes: i64,
    /// Resend cooldown in seconds; 0 disables the interval lock
    pub interval_seconds: i64,
    /// Per-recipient daily send cap; 0 disables the cap
    pub daily_cap: i64,
}

impl CaptchaRequest {
    /// Build a request for a single recipient
    pub fn new(
        recipient: impl Into<String>,
        scene: impl Into<String>,
        template_id: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self::batch(vec![recipient.into()], scene, template_id, code)
    }

    /// Build a request for several recipients sharing one dispatch
    pub fn batch(
        recipients: Vec<String>,
        scene: impl Into<String>,
        template_id: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            recipients,
            scene: scene.into(),
            template_id: template_id.into(),
            code: code.into(),
            expires_minutes: DEFAULT_EXPIRES_MINUTES,
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            daily_cap: DEFAULT_DAILY_CAP,
        }
    }

    /// Set the code expiry in minutes
    pub fn with_expiry(mut self, minutes: i64) -> Self {
        self.expires_minutes = minutes;
        self
    }

    /// Set the resend cooldown in seconds (0 disables)
    pub fn with_interval(mut self, seconds: i64) -> Self {
        self.interval_seconds = seconds;
        self
    }

    /// Set the per-recipient daily send cap (0 disables)
    pub fn with_daily_cap(mut self, cap: i64) -> Self {
        self.daily_cap = cap;
        self
    }

    /// Check that all required fields are set
    pub(crate) fn validate(&self) -> CaptchaResult<()> {
        if self.recipients.is_empty() || self.recipients.iter().any(|r| r.is_empty()) {
            return Err(CaptchaError::Configuration {
                field: "recipient",
            });
        }
        if self.scene.is_empty() {
            return Err(CaptchaError::Configuration { field: "scene" });
        }
        if self.template_id.is_empty() {
            return Err(CaptchaError::Configuration {
                field: "template_id",
            });
        }
        if self.code.is_empty() {
            return Err(CaptchaError::Configuration { field: "code" });
        }
        // A non-positive expiry cannot produce a verifiable entry; it
        // must fail here, before any dispatch or cache write.
        if self.expires_minutes <= 0 {
            return Err(CaptchaError::Configuration {
                field: "expires_minutes",
            });
        }
        Ok(())
    }
}

/// Generate a random numeric captcha of the given length
///
/// Uses the OS CSPRNG; leading zeros are allowed.
pub fn generate_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(b'0' + (rng.next_u32() % 10) as u8))
        .collect()
}
