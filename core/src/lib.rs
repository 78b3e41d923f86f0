//! # Cloopen captcha core
//!
//! Captcha issuance and verification logic for SMS one-time codes.
//! This crate contains the captcha controller, the collaborator traits
//! for the SMS gateway and the shared cache, and the error taxonomy.
//! Concrete collaborators (Redis store, Cloopen HTTP client) live in
//! the infrastructure crate.

pub mod captcha;
pub mod errors;
pub mod gateway;
pub mod store;

// Re-export commonly used types for convenience
pub use captcha::{CaptchaRequest, CaptchaService};
pub use errors::{CaptchaError, CaptchaResult};
pub use gateway::{ProviderOutcome, SmsGateway};
pub use store::{CacheError, CaptchaStore};
