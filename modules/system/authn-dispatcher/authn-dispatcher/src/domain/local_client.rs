//! Local (in-process) client for the `AuthN` dispatcher.

use std::sync::Arc;

use async_trait::async_trait;
use authn_dispatcher_sdk::{AuthnDispatcherClient, AuthnDispatcherError, RequestCredentials};
use tokio_util::sync::CancellationToken;
use warden_security::IdentityRecord;

use super::{DomainError, Service};

/// Local client wrapping the service.
///
/// Handed to the host by [`AuthnDispatcher::init`](crate::AuthnDispatcher::init).
pub struct AuthnDispatcherLocalClient {
    svc: Arc<Service>,
}

impl AuthnDispatcherLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> AuthnDispatcherError {
    if e.is_client_rejection() {
        tracing::debug!(operation = op, error = %e, "authn_dispatcher call rejected");
    } else {
        tracing::error!(operation = op, error = ?e, "authn_dispatcher call failed");
    }
    e.into()
}

#[async_trait]
impl AuthnDispatcherClient for AuthnDispatcherLocalClient {
    async fn authenticate_and_augment(
        &self,
        credentials: RequestCredentials,
    ) -> Result<IdentityRecord, AuthnDispatcherError> {
        self.svc
            .authenticate_and_augment(credentials)
            .await
            .map_err(|e| log_and_convert("authenticate_and_augment", e))
    }

    async fn authenticate_and_augment_with_cancellation(
        &self,
        credentials: RequestCredentials,
        cancel: &CancellationToken,
    ) -> Result<IdentityRecord, AuthnDispatcherError> {
        self.svc
            .authenticate_and_augment_with_cancellation(credentials, cancel)
            .await
            .map_err(|e| log_and_convert("authenticate_and_augment_with_cancellation", e))
    }

        fn accept_prebuilt_identity(&self, identity: IdentityRecord) -> IdentityRecord {
        self.svc.accept_prebuilt_identity(identity)
    }
}
