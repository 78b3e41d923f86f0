//! SMS gateway collaborator interface

use async_trait::async_trait;
use std::fmt;

/// Classified result of a gateway dispatch
///
/// Produced by the gateway client and consumed immediately by the
/// captcha controller; never cached. Network-level failures surface as
/// [`ProviderOutcome::Fatal`] with the `transport` code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    /// The gateway accepted the message
    Success,
    /// The gateway rejected the request for a transient reason
    /// (throttling, temporary account issue); the caller may retry later
    Recoverable { code: String, message: String },
    /// The gateway rejected the request permanently
    /// (bad template, malformed recipient) or the transport failed
    Fatal { code: String, message: String },
}

/// Outcome code used for network-level failures
pub const TRANSPORT_ERROR_CODE: &str = "transport";

impl ProviderOutcome {
    /// Build a fatal outcome for a transport-level failure
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Fatal {
            code: TRANSPORT_ERROR_CODE.to_string(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Whether the caller may reasonably retry the dispatch
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable { .. })
    }
}

impl fmt::Display for ProviderOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Recoverable { code, message } => {
                write!(f, "recoverable [{}]: {}", code, message)
            }
            Self::Fatal { code, message } => write!(f, "fatal [{}]: {}", code, message),
        }
    }
}

/// Trait for SMS gateway integration
///
/// One call maps to one template-SMS request. Implementations do not
/// retry internally; retries are the caller's responsibility.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Dispatch a template message to one or more recipients
    ///
    /// `variables` are the positional substitution values for the
    /// template. `request_id` and `sub_append` are the gateway's
    /// optional pass-through fields.
    async fn dispatch(
        &self,
        recipients: &[String],
        variables: &[String],
        template_id: &str,
        request_id: Option<&str>,
        sub_append: Option<&str>,
    ) -> ProviderOutcome;
}
