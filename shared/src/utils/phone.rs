//! Phone number utilities
//!
//! The Cloopen gateway serves mainland Chinese mobile numbers, so
//! validation targets the 1[3-9] prefix space. Masking is used anywhere
//! a recipient appears in a log line.

use once_cell::sync::Lazy;
use regex::Regex;

// Chinese mobile phone number regex
static CHINA_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^1[3-9]\d{9}$").unwrap());

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is a valid Chinese mobile number
pub fn is_valid_chinese_mobile(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    CHINA_MOBILE_REGEX.is_match(&normalized)
}

/// Mask a phone number for logging (e.g., 138****1111)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() < 7 {
        return "*".repeat(normalized.len());
    }
    format!(
        "{}****{}",
        &normalized[..3],
        &normalized[normalized.len() - 4..]
    )
}
