//! Public API trait for the `AuthN` dispatcher.
//!
//! This trait defines the interface hosts use to turn inbound credential
//! material into an augmented identity. The dispatcher module implements it
//! over its registered mechanisms and augmentors.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use warden_security::IdentityRecord;

use crate::error::AuthnDispatcherError;
use crate::models::{RequestCredentials, RequestIdentitySource};

/// Public API trait for the `AuthN` dispatcher.
///
/// ```ignore
/// let identity = authn
///     .resolve(RequestIdentitySource::Credentials(request))
///     .await?;
/// ```
#[async_trait]
pub trait AuthnDispatcherClient: Send + Sync {
    /// Authenticate the request credentials and run every registered augmentor.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if no mechanism could attempt authentication
    /// - `AuthenticationFailed` if the selected mechanism rejected the credentials
    /// - `AugmentorFailure` if an augmentor failed
    /// - `ServiceUnavailable` if a mechanism's identity provider is unreachable
    /// - `Internal` for unexpected errors
    async fn authenticate_and_augment(
        &self,
        credentials: RequestCredentials,
    ) -> Result<IdentityRecord, AuthnDispatcherError>;

    /// Same as [`AuthnDispatcherClient::authenticate_and_augment`], aborted
    /// when `cancel` fires.
    ///
    /// Dropping the future of `authenticate_and_augment` also cancels the
    /// request; this entry point reports it as an error instead.
    ///
    /// # Errors
    ///
    /// - `Cancelled` if `cancel` fired before an identity was produced
    /// - otherwise the errors of [`AuthnDispatcherClient::authenticate_and_augment`]
    async fn authenticate_and_augment_with_cancellation(
        &self,
        credentials: RequestCredentials,
        cancel: &CancellationToken,
    ) -> Result<IdentityRecord, AuthnDispatcherError>;

    /// Accept an identity built by a host filter before route matching.
    ///
    /// The dispatcher is not consulted.
    fn accept_prebuilt_identity(&self, identity: IdentityRecord) -> IdentityRecord;

    /// Resolve the identity of a request from whichever source the host has.
    ///
    /// # Errors
    ///
    /// Same as [`AuthnDispatcherClient::authenticate_and_augment`] for the
    /// `Credentials` source. The `Prebuilt` source never fails.
    async fn resolve(
        &self,
        source: RequestIdentitySource,
    ) -> Result<IdentityRecord, AuthnDispatcherError> {
        match source {
            RequestIdentitySource::Credentials(credentials) => {
                self.authenticate_and_augment(credentials).await
            }
            RequestIdentitySource::Prebuilt(identity) => {
                Ok(self.accept_prebuilt_identity(identity))
            }
        }
    }
}
