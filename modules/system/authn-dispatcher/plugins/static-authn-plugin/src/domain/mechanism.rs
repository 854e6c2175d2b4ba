//! Mechanism implementation for the static `AuthN` plugin.
//!
//! Implements `AuthenticationMechanism` using the domain service.

use std::collections::BTreeSet;

use async_trait::async_trait;
use authn_dispatcher_sdk::{AuthenticationMechanism, Challenge, MechanismError, RequestCredentials};
use secrecy::ExposeSecret;
use warden_security::{Credential, CredentialKind, CredentialTransport, IdentityRecord};

use super::service::Service;

#[async_trait]
impl AuthenticationMechanism for Service {
    fn name(&self) -> &str {
        "static-authn"
    }

    async fn authenticate(
        &self,
        credential: &Credential,
        _request: &RequestCredentials,
    ) -> Result<Option<IdentityRecord>, MechanismError> {
        self.authenticate_token(credential.secret().expose_secret())
            .map(Some)
    }

    fn challenge(&self) -> Challenge {
        self.bearer_challenge()
    }

    fn credential_types(&self) -> BTreeSet<CredentialKind> {
        BTreeSet::from([CredentialKind::TOKEN])
    }

    fn credential_transport(&self) -> Option<CredentialTransport> {
        Some(CredentialTransport::bearer())
    }
}
