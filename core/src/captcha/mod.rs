//! Captcha issuance and verification
//!
//! This module provides the complete captcha workflow against a shared
//! cache and an SMS gateway:
//! - per-attempt request values and code generation
//! - cache key derivation for verification entries, interval locks and
//!   daily counters
//! - the controller orchestrating rate limits, dispatch and single-use
//!   verification

pub mod keys;
mod request;
mod service;

#[cfg(test)]
mod tests;

pub use request::{generate_code, CaptchaRequest};
pub use service::CaptchaService;
