//! Captcha controller
//!
//! Orchestrates rate limiting, gateway dispatch and single-use
//! verification against the shared cache. One service instance is
//! constructed by the host application and passed by reference to all
//! call sites; there are no ambient singletons.

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, error, info, warn};

use cl_shared::config::CaptchaConfig;
use cl_shared::utils::phone::mask_phone_number;

use crate::errors::{CaptchaError, CaptchaResult};
use crate::gateway::SmsGateway;
use crate::store::{CacheError, CaptchaStore};

use super::keys;
use super::request::{generate_code, CaptchaRequest};

/// Captcha service over an SMS gateway and a shared cache store
///
/// Rate limiting is keyed per (recipient, scene). The interval lock is
/// a best-effort throttle (its check and its write are not atomic as a
/// pair); the daily counter uses an atomic increment and provides the
/// hard bound. Verification is an atomic compare-and-delete, so a code
/// verifies at most once even under concurrent checks.
pub struct CaptchaService<G: SmsGateway, S: CaptchaStore> {
    gateway: Arc<G>,
    store: Arc<S>,
    config: CaptchaConfig,
}

impl<G: SmsGateway, S: CaptchaStore> CaptchaService<G, S> {
    /// Create a new captcha service
    pub fn new(gateway: Arc<G>, store: Arc<S>, config: CaptchaConfig) -> Self {
        Self {
            gateway,
            store,
            config,
        }
    }

    /// Send a captcha to every recipient of the request
    ///
    /// Order of operations per the abuse-control contract:
    /// 1. validate required fields (no side effects on failure)
    /// 2. refuse while any recipient's interval lock is present
    /// 3. count against each recipient's daily cap (increments are not
    ///    rolled back on refusal)
    /// 4. dispatch once via the gateway; on failure nothing is written
    /// 5. write interval locks and verification entries
    ///
    /// Cache failures after the dispatch succeeded surface as
    /// [`CaptchaError::Persistence`]: the message is already delivered
    /// and is not resent, but the code may be unverifiable.
    pub async fn send(&self, request: &CaptchaRequest) -> CaptchaResult<()> {
        request.validate()?;

        let bases: Vec<String> = request
            .recipients
            .iter()
            .map(|r| keys::captcha_key(&self.config.key_prefix, r, &request.scene))
            .collect();

        if request.interval_seconds > 0 {
            for (recipient, base) in request.recipients.iter().zip(&bases) {
                let lock_key = keys::interval_lock_key(base);
                if let Some(ttl) = self.store.ttl(&lock_key).await? {
                    warn!(
                        recipient = %mask_phone_number(recipient),
                        scene = %request.scene,
                        retry_after = ttl,
                        "captcha send refused: interval lock present"
                    );
                    return Err(CaptchaError::RateLimited {
                        retry_after_seconds: ttl.max(0),
                    });
                }
            }
        }

        if request.daily_cap > 0 {
            let today = Local::now().date_naive();
            for (recipient, base) in request.recipients.iter().zip(&bases) {
                let counter_key = keys::daily_send_key(base, today);
                let count = self.store.increment(&counter_key).await?;
                if count == 1 {
                    // First send of the day: expire the counter at local midnight
                    self.store
                        .expire(&counter_key, keys::seconds_until_midnight(Local::now()))
                        .await?;
                }
                if count > request.daily_cap {
                    warn!(
                        recipient = %mask_phone_number(recipient),
                        scene = %request.scene,
                        cap = request.daily_cap,
                        "captcha send refused: daily cap reached"
                    );
                    return Err(CaptchaError::DailyCapReached {
                        cap: request.daily_cap,
                    });
                }
            }
        }

        let variables = vec![
            request.code.clone(),
            format!("{}分钟", request.expires_minutes),
        ];
        let outcome = self
            .gateway
            .dispatch(&request.recipients, &variables, &request.template_id, None, None)
            .await;
        if !outcome.is_success() {
            return Err(CaptchaError::Dispatch { outcome });
        }

        info!(
            scene = %request.scene,
            recipients = request.recipients.len(),
            template_id = %request.template_id,
            "captcha dispatched"
        );

        self.persist(request, &bases).await.map_err(|e| {
            error!(
                scene = %request.scene,
                error = %e,
                "captcha delivered but cache writes failed"
            );
            CaptchaError::Persistence { message: e.message }
        })
    }

    /// Verify a submitted code for one (recipient, scene)
    ///
    /// Single-use: a match deletes the entry in the same atomic
    /// operation, so the same code cannot verify twice. Mismatch and
    /// absence both return [`CaptchaError::Validation`] and leave any
    /// stored entry in place.
    pub async fn check(&self, recipient: &str, scene: &str, submitted: &str) -> CaptchaResult<()> {
        if recipient.is_empty() {
            return Err(CaptchaError::Configuration {
                field: "recipient",
            });
        }
        if scene.is_empty() {
            return Err(CaptchaError::Configuration { field: "scene" });
        }
        if submitted.is_empty() {
            return Err(CaptchaError::Configuration { field: "code" });
        }

        let key = keys::captcha_key(&self.config.key_prefix, recipient, scene);
        if self.store.compare_and_delete(&key, submitted).await? {
            info!(
                recipient = %mask_phone_number(recipient),
                scene = scene,
                "captcha verified"
            );
            Ok(())
        } else {
            debug!(
                recipient = %mask_phone_number(recipient),
                scene = scene,
                "captcha rejected"
            );
            Err(CaptchaError::Validation)
        }
    }

    /// Generate and send a captcha using the configured defaults
    ///
    /// Returns the generated code so the host application can correlate
    /// it with its own session state. Requires a default template id in
    /// the configuration.
    pub async fn issue(&self, recipient: &str, scene: &str) -> CaptchaResult<String> {
        if self.config.template_id.is_empty() {
            return Err(CaptchaError::Configuration {
                field: "template_id",
            });
        }

        let code = generate_code(self.config.code_length);
        let request = CaptchaRequest::new(recipient, scene, &self.config.template_id, &code)
            .with_expiry(self.config.expires_minutes)
            .with_interval(self.config.interval_seconds)
            .with_daily_cap(self.config.daily_cap);
        self.send(&request).await?;
        Ok(code)
    }

    async fn persist(&self, request: &CaptchaRequest, bases: &[String]) -> Result<(), CacheError> {
        for base in bases {
            if request.interval_seconds > 0 {
                self.store
                    .set_with_expiry(
                        &keys::interval_lock_key(base),
                        &request.code,
                        request.interval_seconds,
                    )
                    .await?;
            }
            self.store
                .set_with_expiry(base, &request.code, request.expires_minutes * 60)
                .await?;
        }
        Ok(())
    }
}
