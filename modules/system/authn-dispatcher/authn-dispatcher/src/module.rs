//! `AuthN` dispatcher module.

use std::sync::{Arc, OnceLock};

use authn_dispatcher_sdk::{AuthenticationMechanism, AuthnDispatcherClient, IdentityAugmentor};
use tracing::info;

use crate::config::AuthnDispatcherConfig;
use crate::domain::{AugmentorRegistry, AuthnDispatcherLocalClient, MechanismRegistry, Service};

/// `AuthN` Dispatcher module.
///
/// This module:
/// 1. Collects mechanism and augmentor registrations from the host
/// 2. Builds the service once configuration is available
/// 3. Hands the host an [`AuthnDispatcherClient`] to call per request
///
/// Registrations made after `init` are picked up by the next request.
pub struct AuthnDispatcher {
    mechanisms: Arc<MechanismRegistry>,
    augmentors: Arc<AugmentorRegistry>,
    service: OnceLock<Arc<Service>>,
}

impl Default for AuthnDispatcher {
    fn default() -> Self {
        Self {
            mechanisms: Arc::new(MechanismRegistry::new()),
            augmentors: Arc::new(AugmentorRegistry::new()),
            service: OnceLock::new(),
        }
    }
}

impl AuthnDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an authentication mechanism; lower priorities are consulted first.
    pub fn register_mechanism(
        &self,
        priority: i32,
        mechanism: Arc<dyn AuthenticationMechanism>,
    ) {
        info!(mechanism = mechanism.name(), priority, "Registering mechanism");
        self.mechanisms.register_mechanism(priority, mechanism);
    }

    /// Register an identity augmentor; lower priorities run first.
    pub fn register_augmentor(
        &self,
        priority: i32,
        augmentor: Arc<dyn IdentityAugmentor>,
    ) {
        info!(augmentor = augmentor.name(), priority, "Registering augmentor");
        self.augmentors.register_augmentor(priority, augmentor);
    }

    /// Build the service and return the client hosts call per request.
    ///
    /// # Errors
    ///
    /// Fails if the module was already initialized.
    #[tracing::instrument(skip_all)]
    pub fn init(
        &self,
        cfg: &AuthnDispatcherConfig,
    ) -> anyhow::Result<Arc<dyn AuthnDispatcherClient>> {
        info!(
            mechanisms = self.mechanisms.len(),
            augmentors = self.augmentors.len(),
            security_providers = ?cfg.security_providers,
            "Initializing authn_dispatcher"
        );

        let svc = Arc::new(Service::new(
            self.mechanisms.clone(),
            self.augmentors.clone(),
            cfg,
        ));

        self.service
            .set(svc.clone())
            .map_err(|_| anyhow::anyhow!("Service already initialized"))?;

        let api: Arc<dyn AuthnDispatcherClient> = Arc::new(AuthnDispatcherLocalClient::new(svc));
        Ok(api)
    }

    /// The service built by [`Self::init`], if any.
    #[must_use]
    pub fn service(&self) -> Option<Arc<Service>> {
        self.service.get().cloned()
    }
}
