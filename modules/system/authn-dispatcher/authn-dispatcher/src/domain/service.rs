//! Per-request entry points of the `AuthN` dispatcher.

use std::sync::Arc;

use authn_dispatcher_sdk::{
    AugmentationContext, AuthenticationOutcome, RequestCredentials, RequestIdentitySource,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use warden_security::IdentityRecord;

use super::dispatcher::AuthenticationDispatcher;
use super::error::DomainError;
use super::pipeline::AugmentationPipeline;
use super::registry::{AugmentorRegistry, MechanismRegistry};
use crate::config::AuthnDispatcherConfig;

/// `AuthN` dispatcher service.
///
/// Authenticates requests through the registered mechanisms and runs the
/// augmentation pipeline over the result.
#[derive(Debug)]
pub struct Service {
    dispatcher: AuthenticationDispatcher,
    pipeline: AugmentationPipeline,
    security_providers: Vec<String>,
}

impl Service {
    #[must_use]
    pub fn new(
        mechanisms: Arc<MechanismRegistry>,
        augmentors: Arc<AugmentorRegistry>,
        cfg: &AuthnDispatcherConfig,
    ) -> Self {
        Self {
            dispatcher: AuthenticationDispatcher::new(mechanisms),
            pipeline: AugmentationPipeline::new(augmentors),
            security_providers: cfg.security_providers.clone(),
        }
    }

    /// Security providers the host should activate.
    #[must_use]
    pub fn security_providers(&self) -> &[String] {
        &self.security_providers
    }

    /// Authenticate a request and augment the resulting identity.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if no credentials were supplied or no mechanism accepted them
    /// - `AuthenticationFailed` if the selected mechanism rejected the credentials
    /// - `AugmentorFailed` if an augmentor failed; no identity is produced
    /// - `MechanismUnavailable` / `Internal` for mechanism faults
    #[tracing::instrument(skip_all, fields(request_id = %request.request_id))]
    pub async fn authenticate_and_augment(
        &self,
        request: RequestCredentials,
    ) -> Result<IdentityRecord, DomainError> {
        let identity = match self.dispatcher.authenticate(&request).await? {
            AuthenticationOutcome::Authenticated(identity) => identity,
            AuthenticationOutcome::Unauthenticated(challenge) => {
                return Err(DomainError::Unauthenticated { challenge });
            }
            AuthenticationOutcome::Failed { reason, challenge } => {
                return Err(DomainError::AuthenticationFailed { reason, challenge });
            }
        };

        let ctx = AugmentationContext::new(request.request_id, request.attributes);
        let identity = self.pipeline.run(identity, &ctx).await?;

        debug!(
            principal = identity.principal_name(),
            roles = identity.roles().len(),
            "Identity resolved"
        );
        Ok(identity)
    }

    /// Same as [`Self::authenticate_and_augment`], aborted when `cancel` fires.
    ///
    /// Cancellation drops the in-flight mechanism or augmentor and produces
    /// no identity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Cancelled` if `cancel` fired first, otherwise
    /// the errors of [`Self::authenticate_and_augment`].
    pub async fn authenticate_and_augment_with_cancellation(
        &self,
        request: RequestCredentials,
        cancel: &CancellationToken,
    ) -> Result<IdentityRecord, DomainError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Request cancelled before an identity was produced");
                Err(DomainError::Cancelled)
            }
            result = self.authenticate_and_augment(request) => result,
        }
    }

    /// Accept an identity built by another component.
    ///
    /// The dispatcher and the augmentors are bypassed; the record is
    /// returned as is.
    #[must_use]
    #[allow(clippy::unused_self)] // Same receiver as the credential entry point
    pub fn accept_prebuilt_identity(&self, identity: IdentityRecord) -> IdentityRecord {
        debug!(
            principal = identity.principal_name(),
            roles = identity.roles().len(),
            "Accepted prebuilt identity"
        );
        identity
    }

    /// Resolve the identity from whichever source the host has.
    ///
    /// # Errors
    ///
    /// See [`Self::authenticate_and_augment`].
    pub async fn resolve(
        &self,
        source: RequestIdentitySource,
    ) -> Result<IdentityRecord, DomainError> {
        match source {
            RequestIdentitySource::Credentials(request) => {
                self.authenticate_and_augment(request).await
            }
            RequestIdentitySource::Prebuilt(identity) => {
                Ok(self.accept_prebuilt_identity(identity))
            }
        }
    }
}
