//! Provider status-code catalog
//!
//! The Cloopen REST API reports every request outcome as a six-digit
//! status code. `"000000"` is success; everything else is a failure
//! the caller either can retry (throttling, transient platform
//! trouble) or cannot (bad credentials, blacklisted number, template
//! rejected). The catalog holds that classification and is injected
//! into the gateway client, so deployments can extend or override it
//! as the provider's table evolves.

use std::collections::HashMap;

/// Success status code returned by the provider
pub const SUCCESS_CODE: &str = "000000";

/// How a non-success provider code should be treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeClass {
    /// Transient: the same request may succeed if retried later
    Recoverable,
    /// Permanent: retrying the identical request will fail again
    Fatal,
}

/// Codes this client distinguishes out of the box
const DEFAULT_ENTRIES: &[(&str, OutcomeClass, &str)] = &[
    // Transient platform and throttling conditions
    ("111111", OutcomeClass::Recoverable, "Platform internal error"),
    ("111142", OutcomeClass::Recoverable, "SMS sending too frequent"),
    ("160000", OutcomeClass::Recoverable, "SMS platform error"),
    ("160038", OutcomeClass::Recoverable, "Template SMS daily limit reached"),
    ("160039", OutcomeClass::Recoverable, "Hourly send limit for this number reached"),
    ("160040", OutcomeClass::Recoverable, "Daily send limit for this number reached"),
    ("160041", OutcomeClass::Recoverable, "Send interval for this number too short"),
    ("160050", OutcomeClass::Recoverable, "Number sends too frequently, try later"),
    // Permanent account, template and recipient conditions
    ("111109", OutcomeClass::Fatal, "Invalid account sid"),
    ("111141", OutcomeClass::Fatal, "Insufficient account balance"),
    ("111143", OutcomeClass::Fatal, "Template not approved"),
    ("111181", OutcomeClass::Fatal, "Template variable count mismatch"),
    ("113302", OutcomeClass::Fatal, "Signature verification failed"),
    ("160031", OutcomeClass::Fatal, "Too many recipients in one request"),
    ("160032", OutcomeClass::Fatal, "Template does not exist"),
    ("160033", OutcomeClass::Fatal, "Number in blacklist"),
    ("160034", OutcomeClass::Fatal, "Number not on whitelist"),
    ("160042", OutcomeClass::Fatal, "Invalid phone number"),
    ("160043", OutcomeClass::Fatal, "Number already unsubscribed"),
    ("160044", OutcomeClass::Fatal, "Template content contains banned words"),
    ("160048", OutcomeClass::Fatal, "Empty phone number"),
];

/// Classification table for provider status codes
#[derive(Debug, Clone)]
pub struct ErrorCatalog {
    entries: HashMap<String, (OutcomeClass, String)>,
}

impl ErrorCatalog {
    /// Catalog pre-loaded with the documented provider codes
    pub fn new() -> Self {
        Self::from_entries(
            DEFAULT_ENTRIES
                .iter()
                .map(|(code, class, message)| (code.to_string(), *class, message.to_string())),
        )
    }

    /// Build a catalog from caller-supplied entries
    ///
    /// Later entries win on duplicate codes, so chaining the defaults
    /// with overrides replaces the default classification.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, OutcomeClass, String)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(code, class, message)| (code, (class, message)))
                .collect(),
        }
    }

    /// Add or replace a single entry
    pub fn with_entry(
        mut self,
        code: impl Into<String>,
        class: OutcomeClass,
        message: impl Into<String>,
    ) -> Self {
        self.entries.insert(code.into(), (class, message.into()));
        self
    }

    /// Classify a provider status code
    ///
    /// Unknown codes classify as recoverable: a code this table has
    /// never seen is more likely a new platform condition than a new
    /// permanent rejection, and retrying is the safe default.
    pub fn classify(&self, code: &str) -> (OutcomeClass, String) {
        match self.entries.get(code) {
            Some((class, message)) => (*class, message.clone()),
            None => (
                OutcomeClass::Recoverable,
                format!("Unrecognized provider status code {}", code),
            ),
        }
    }

    /// Whether a status code denotes success
    pub fn is_success(code: &str) -> bool {
        code == SUCCESS_CODE
    }
}

impl Default for ErrorCatalog {
    fn default() -> Self {
        Self::new()
    }
}
