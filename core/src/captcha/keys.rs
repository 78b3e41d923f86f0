//! Cache key derivation for captcha state
//!
//! The verification key is a deterministic function of
//! (prefix, recipient, scene) only — no randomness, no time — so a
//! check always targets the exact key written by the matching send.
//! Auxiliary keys (interval lock, daily counter) are suffixed variants.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Key of the verification entry for one (recipient, scene)
pub fn captcha_key(prefix: &str, recipient: &str, scene: &str) -> String {
    format!("{}{}:{}:captcha", prefix, recipient, scene)
}

/// Key of the resend cooldown marker
pub fn interval_lock_key(base: &str) -> String {
    format!("{}:interval_lock", base)
}

/// Key of the per-day send counter
pub fn daily_send_key(base: &str, date: NaiveDate) -> String {
    format!("{}:{}:send", base, date.format("%Y%m%d"))
}

/// Seconds from `now` to the next local midnight, at least 1
///
/// Used as the expiry of the daily counter so it resets at the local
/// day boundary without a separate reset job.
pub fn seconds_until_midnight(now: DateTime<Local>) -> i64 {
    let next_midnight = NaiveDateTime::new(
        now.date_naive() + chrono::Duration::days(1),
        NaiveTime::MIN,
    );
    (next_midnight - now.naive_local()).num_seconds().max(1)
}
