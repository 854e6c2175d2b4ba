//! Delegate-and-override composition for authentication mechanisms.
//!
//! [`DelegatingMechanism`] owns a wrapped mechanism and forwards every
//! operation to it unless an override is installed for that operation.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use warden_security::{Credential, CredentialKind, CredentialTransport, IdentityRecord};

use crate::error::MechanismError;
use crate::mechanism::AuthenticationMechanism;
use crate::models::{Challenge, RequestCredentials};

/// Replacement for the wrapped mechanism's `authenticate`.
///
/// Receives the wrapped mechanism so it can pre-process the credential,
/// post-process the identity, or skip the delegate entirely.
#[async_trait]
pub trait AuthenticateOverride: Send + Sync {
    /// # Errors
    ///
    /// Same contract as [`AuthenticationMechanism::authenticate`].
    async fn authenticate(
        &self,
        delegate: &dyn AuthenticationMechanism,
        credential: &Credential,
        request: &RequestCredentials,
    ) -> Result<Option<IdentityRecord>, MechanismError>;
}

/// Mechanism that wraps another one and overrides selected operations.
///
/// ```ignore
/// let mechanism = DelegatingMechanism::new(jwt_mechanism)
///     .with_name("api-jwt")
///     .with_challenge(Challenge::bearer(Some("api")));
/// ```
pub struct DelegatingMechanism {
    delegate: Arc<dyn AuthenticationMechanism>,
    name: Option<String>,
    challenge: Option<Challenge>,
    credential_types: Option<BTreeSet<CredentialKind>>,
    credential_transport: Option<CredentialTransport>,
    authenticate: Option<Arc<dyn AuthenticateOverride>>,
}

impl DelegatingMechanism {
    /// Wrap `delegate`, forwarding every operation.
    #[must_use]
    pub fn new(delegate: Arc<dyn AuthenticationMechanism>) -> Self {
        Self {
            delegate,
            name: None,
            challenge: None,
            credential_types: None,
            credential_transport: None,
            authenticate: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_challenge(mut self, challenge: Challenge) -> Self {
        self.challenge = Some(challenge);
        self
    }

    #[must_use]
    pub fn with_credential_types<I>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = CredentialKind>,
    {
        self.credential_types = Some(kinds.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_credential_transport(mut self, transport: CredentialTransport) -> Self {
        self.credential_transport = Some(transport);
        self
    }

    #[must_use]
    pub fn with_authenticate(mut self, hook: Arc<dyn AuthenticateOverride>) -> Self {
        self.authenticate = Some(hook);
        self
    }

    /// The wrapped mechanism.
    #[must_use]
    pub fn delegate(&self) -> &Arc<dyn AuthenticationMechanism> {
        &self.delegate
    }
}

#[async_trait]
impl AuthenticationMechanism for DelegatingMechanism {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.delegate.name())
    }

    async fn authenticate(
        &self,
        credential: &Credential,
        request: &RequestCredentials,
    ) -> Result<Option<IdentityRecord>, MechanismError> {
        match &self.authenticate {
            Some(hook) => {
                hook.authenticate(&*self.delegate, credential, request)
                    .await
            }
            None => self.delegate.authenticate(credential, request).await,
        }
    }

    fn challenge(&self) -> Challenge {
        self.challenge
            .clone()
            .unwrap_or_else(|| self.delegate.challenge())
    }

    fn credential_types(&self) -> BTreeSet<CredentialKind> {
        self.credential_types
            .clone()
            .unwrap_or_else(|| self.delegate.credential_types())
    }

    fn credential_transport(&self) -> Option<CredentialTransport> {
        self.credential_transport
            .clone()
            .or_else(|| self.delegate.credential_transport())
    }

    fn supports(&self, credential: &Credential) -> bool {
        if self.credential_types.is_none() && self.credential_transport.is_none() {
            return self.delegate.supports(credential);
        }
        self.credential_types().contains(credential.kind())
            && self
                .credential_transport()
                .is_none_or(|transport| transport.matches(credential.transport()))
    }
}
