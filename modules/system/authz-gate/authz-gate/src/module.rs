//! `AuthZ` gate module.

use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use authz_gate_sdk::{AuthorizationController, AuthzGateClient, AuthzGateError};
use tracing::{error, info};

use crate::config::AuthorizationConfig;
use crate::domain::{
    AuthorizationGate, AuthzGateLocalClient, ControllerRegistration,
    DefaultAuthorizationController,
};

/// `AuthZ` Gate module.
///
/// Collects controller registrations from the host and resolves the single
/// active controller during `init`. A priority tie is fatal at startup.
pub struct AuthzGate {
    registrations: ArcSwap<Vec<ControllerRegistration>>,
    gate: OnceLock<Arc<AuthorizationGate>>,
}

impl Default for AuthzGate {
    fn default() -> Self {
        Self {
            registrations: ArcSwap::from_pointee(Vec::new()),
            gate: OnceLock::new(),
        }
    }
}

impl AuthzGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a controller; the highest explicit priority wins at `init`.
    ///
    /// # Errors
    ///
    /// Fails once the gate has been resolved; the active controller is
    /// fixed for the lifetime of the process.
    pub fn register_controller(
        &self,
        priority: Option<i32>,
        controller: Arc<dyn AuthorizationController>,
    ) -> anyhow::Result<()> {
        if let Some(gate) = self.gate.get() {
            error!(
                controller = controller.name(),
                ?priority,
                active = gate.controller_name(),
                "Authorization controller registered after init"
            );
            anyhow::bail!(
                "authorization controller '{}' registered after the gate was resolved (active: '{}')",
                controller.name(),
                gate.controller_name()
            );
        }
        info!(
            controller = controller.name(),
            ?priority,
            "Registering authorization controller"
        );
        let registration = ControllerRegistration::new(priority, controller);
        self.registrations.rcu(|current| {
            let mut next: Vec<ControllerRegistration> = current.iter().cloned().collect();
            next.push(registration.clone());
            next
        });
        Ok(())
    }

    /// Resolve the active controller and return the client hosts call per request.
    ///
    /// # Errors
    ///
    /// Fails on a controller priority tie or if the module was already initialized.
    #[tracing::instrument(skip_all)]
    pub fn init(&self, cfg: &AuthorizationConfig) -> anyhow::Result<Arc<dyn AuthzGateClient>> {
        let registrations = self.registrations.load_full();
        info!(
            controllers = registrations.len(),
            default_enabled = cfg.enabled,
            "Initializing authz_gate"
        );

        let fallback = Arc::new(DefaultAuthorizationController::from_config(cfg));
        let gate = AuthorizationGate::resolve(&registrations, fallback).map_err(|e| {
            error!(error = %e, "Authorization controller resolution failed");
            AuthzGateError::from(e)
        })?;
        let gate = Arc::new(gate);

        self.gate
            .set(gate.clone())
            .map_err(|_| anyhow::anyhow!("Gate already initialized"))?;

        let api: Arc<dyn AuthzGateClient> = Arc::new(AuthzGateLocalClient::new(gate));
        Ok(api)
    }

    /// The gate resolved by [`Self::init`], if any.
    #[must_use]
    pub fn gate(&self) -> Option<Arc<AuthorizationGate>> {
        self.gate.get().cloned()
    }
}
