//! Error types for the `AuthN` dispatcher module.

use thiserror::Error;

use crate::models::Challenge;

/// Errors returned to hosts by the `AuthN` dispatcher API.
///
/// `Unauthenticated` and `AuthenticationFailed` carry the challenge the host
/// should answer with. The remaining variants are server-side failures.
#[derive(Debug, Error)]
pub enum AuthnDispatcherError {
    /// No usable credentials were supplied.
    #[error("unauthenticated")]
    Unauthenticated { challenge: Challenge },

    /// Credentials were supplied but rejected by the selected mechanism.
    #[error("authentication failed: {reason}")]
    AuthenticationFailed { reason: String, challenge: Challenge },

    /// An augmentor failed; the identity was not produced.
    #[error("augmentor '{augmentor}' failed: {reason}")]
    AugmentorFailure { augmentor: String, reason: String },

    /// A mechanism's identity provider is not reachable.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The request was aborted before the identity was produced.
    #[error("request cancelled")]
    Cancelled,

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthnDispatcherError {
    /// Challenge the host should send, if this error maps to one.
    #[must_use]
    pub fn challenge(&self) -> Option<&Challenge> {
        match self {
            Self::Unauthenticated { challenge } | Self::AuthenticationFailed { challenge, .. } => {
                Some(challenge)
            }
            Self::AugmentorFailure { .. }
            | Self::ServiceUnavailable(_)
            | Self::Cancelled
            | Self::Internal(_) => None,
        }
    }

    /// HTTP-style status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated { challenge } | Self::AuthenticationFailed { challenge, .. } => {
                challenge.status
            }
            Self::ServiceUnavailable(_) | Self::Cancelled => 503,
            Self::AugmentorFailure { .. } | Self::Internal(_) => 500,
        }
    }
}

/// Errors reported by an [`AuthenticationMechanism`](crate::AuthenticationMechanism).
#[derive(Debug, Error)]
pub enum MechanismError {
    /// Credentials are well-formed but not accepted.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Credentials could not be parsed.
    #[error("malformed credentials: {0}")]
    MalformedCredentials(String),

    /// The backing identity provider is not reachable.
    #[error("identity provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors reported by an [`IdentityAugmentor`](crate::IdentityAugmentor).
#[derive(Debug, Error)]
pub enum AugmentorError {
    /// An external lookup the augmentor depends on failed.
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// Work offloaded with `run_blocking` panicked or was aborted.
    #[error("blocking task failed: {0}")]
    BlockingTask(String),

    /// Any other augmentor failure.
    #[error("{0}")]
    Other(String),
}
