//! Mechanism selection.

use std::sync::Arc;

use authn_dispatcher_sdk::{
    AuthenticationMechanism, AuthenticationOutcome, Challenge, MechanismError, RequestCredentials,
};
use tracing::debug;
use warden_security::{Credential, IdentityRecord};

use super::error::DomainError;
use super::registry::{MechanismRegistry, Registration};

/// Picks the mechanism for a request and runs it.
///
/// Mechanisms are consulted in ascending priority order. Each one is offered
/// the first request credential it supports; a mechanism that declines
/// (`Ok(None)`) hands the request to the next candidate. The first
/// definitive answer ends the search.
#[derive(Debug, Clone)]
pub struct AuthenticationDispatcher {
    mechanisms: Arc<MechanismRegistry>,
}

impl AuthenticationDispatcher {
    #[must_use]
    pub fn new(mechanisms: Arc<MechanismRegistry>) -> Self {
        Self { mechanisms }
    }

    /// Authenticate `request` with the registered mechanisms.
    ///
    /// A request without credentials, or one no mechanism accepts, yields
    /// `AuthenticationOutcome::Unauthenticated`. Rejected credentials yield
    /// `AuthenticationOutcome::Failed`.
    ///
    /// # Errors
    ///
    /// - `DomainError::MechanismUnavailable` if the selected mechanism's provider is down
    /// - `DomainError::Internal` if the selected mechanism failed unexpectedly
    #[tracing::instrument(
        skip_all,
        fields(request_id = %request.request_id, credentials = request.credentials.len())
    )]
    pub async fn authenticate(
        &self,
        request: &RequestCredentials,
    ) -> Result<AuthenticationOutcome, DomainError> {
        let mechanisms = self.mechanisms.snapshot();

        if request.is_empty() {
            debug!("No credentials supplied");
            return Ok(AuthenticationOutcome::Unauthenticated(fallback_challenge(
                &mechanisms,
            )));
        }

        let mut declined: Option<Challenge> = None;

        for entry in mechanisms.iter() {
            let mechanism = entry.item();
            let Some(credential) = request.credentials.iter().find(|c| mechanism.supports(c))
            else {
                continue;
            };

            debug!(
                mechanism = entry.name(),
                priority = entry.priority(),
                kind = %credential.kind(),
                transport = %credential.transport(),
                "Selected mechanism"
            );

            match mechanism.authenticate(credential, request).await {
                Ok(Some(identity)) => {
                    debug!(
                        mechanism = entry.name(),
                        principal = identity.principal_name(),
                        "Authenticated"
                    );
                    return Ok(AuthenticationOutcome::Authenticated(attach_credential(
                        identity, credential,
                    )));
                }
                Ok(None) => {
                    debug!(mechanism = entry.name(), "Mechanism declined");
                    declined.get_or_insert_with(|| mechanism.challenge());
                }
                Err(
                    MechanismError::InvalidCredentials(reason)
                    | MechanismError::MalformedCredentials(reason),
                ) => {
                    debug!(mechanism = entry.name(), %reason, "Credentials rejected");
                    return Ok(AuthenticationOutcome::Failed {
                        reason,
                        challenge: mechanism.challenge(),
                    });
                }
                Err(MechanismError::ProviderUnavailable(reason)) => {
                    return Err(DomainError::MechanismUnavailable {
                        mechanism: entry.name().to_owned(),
                        reason,
                    });
                }
                Err(MechanismError::Internal(reason)) => {
                    return Err(DomainError::Internal(format!(
                        "mechanism '{}': {reason}",
                        entry.name()
                    )));
                }
            }
        }

        debug!("No mechanism authenticated the request");
        Ok(AuthenticationOutcome::Unauthenticated(
            declined.unwrap_or_else(|| fallback_challenge(&mechanisms)),
        ))
    }
}

fn fallback_challenge(mechanisms: &[Registration<dyn AuthenticationMechanism>]) -> Challenge {
    mechanisms
        .first()
        .map_or_else(Challenge::unauthorized, |entry| entry.item().challenge())
}

fn attach_credential(identity: IdentityRecord, credential: &Credential) -> IdentityRecord {
    if identity.credentials().is_empty() {
        identity.to_builder().credential(credential.clone()).build()
    } else {
        identity
    }
}
