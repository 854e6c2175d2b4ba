//! Domain errors for the `AuthN` dispatcher.

use authn_dispatcher_sdk::{AuthnDispatcherError, Challenge};

/// Internal domain errors.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("unauthenticated")]
    Unauthenticated { challenge: Challenge },

    #[error("authentication failed: {reason}")]
    AuthenticationFailed { reason: String, challenge: Challenge },

    #[error("augmentor '{augmentor}' failed: {reason}")]
    AugmentorFailed { augmentor: String, reason: String },

    #[error("mechanism '{mechanism}' unavailable: {reason}")]
    MechanismUnavailable { mechanism: String, reason: String },

    #[error("request cancelled")]
    Cancelled,

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Whether this is an expected client-side outcome rather than a server fault.
    #[must_use]
    pub fn is_client_rejection(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated { .. } | Self::AuthenticationFailed { .. } | Self::Cancelled
        )
    }
}

impl From<DomainError> for AuthnDispatcherError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Unauthenticated { challenge } => Self::Unauthenticated { challenge },
            DomainError::AuthenticationFailed { reason, challenge } => {
                Self::AuthenticationFailed { reason, challenge }
            }
            DomainError::AugmentorFailed { augmentor, reason } => {
                Self::AugmentorFailure { augmentor, reason }
            }
            DomainError::MechanismUnavailable { mechanism, reason } => {
                Self::ServiceUnavailable(format!("mechanism '{mechanism}': {reason}"))
            }
            DomainError::Cancelled => Self::Cancelled,
            DomainError::Internal(reason) => Self::Internal(reason),
        }
    }
}
