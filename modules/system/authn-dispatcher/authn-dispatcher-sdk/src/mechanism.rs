//! Plugin API trait for authentication mechanisms.
//!
//! Mechanisms are registered with the dispatcher at startup together with a
//! priority. For every request the dispatcher offers each mechanism, in
//! priority order, the first credential it supports.

use std::collections::BTreeSet;

use async_trait::async_trait;
use warden_security::{Credential, CredentialKind, CredentialTransport, IdentityRecord};

use crate::error::MechanismError;
use crate::models::{Challenge, RequestCredentials};

/// Authentication mechanism capability.
///
/// The four operations (`authenticate`, `challenge`, `credential_types`,
/// `credential_transport`) form the whole contract, so a mechanism can be
/// wrapped by another one that forwards or overrides each of them
/// (see [`DelegatingMechanism`](crate::DelegatingMechanism)).
#[async_trait]
pub trait AuthenticationMechanism: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Authenticate a supported credential.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(identity))` when the credential is accepted
    /// - `Ok(None)` when the mechanism declines to attempt authentication;
    ///   the dispatcher then tries the next candidate
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` / `MalformedCredentials` if the credential is rejected
    /// - `ProviderUnavailable` if the backing identity provider cannot be reached
    /// - `Internal` for unexpected errors
    async fn authenticate(
        &self,
        credential: &Credential,
        request: &RequestCredentials,
    ) -> Result<Option<IdentityRecord>, MechanismError>;

    /// Challenge sent when this mechanism cannot authenticate the request.
    fn challenge(&self) -> Challenge;

    /// Credential kinds this mechanism understands.
    fn credential_types(&self) -> BTreeSet<CredentialKind>;

    /// Transport the credentials must arrive through; `None` accepts any transport.
    fn credential_transport(&self) -> Option<CredentialTransport>;

    /// Whether this mechanism can handle `credential`.
    fn supports(&self, credential: &Credential) -> bool {
        self.credential_types().contains(credential.kind())
            && self
                .credential_transport()
                .is_none_or(|transport| transport.matches(credential.transport()))
    }
}
