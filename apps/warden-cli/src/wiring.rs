//! Builds the core from configuration.

use std::sync::Arc;

use authn_dispatcher::AuthnDispatcher;
use authn_dispatcher_sdk::{AuthnDispatcherClient, SecurityContextOverride};
use authz_gate::{AuthzGate, ConfigAuthorizationController};
use authz_gate_sdk::AuthzGateClient;
use static_authn_plugin::StaticAuthnPlugin;
use static_roles_plugin::StaticRolesPlugin;
use tracing::info;

use crate::config::WardenConfig;

/// Clients for one fully wired core.
pub struct Warden {
    pub authn: Arc<dyn AuthnDispatcherClient>,
    pub authz: Arc<dyn AuthzGateClient>,
}

/// Register the static plugins and initialize both modules.
///
/// # Errors
///
/// Fails if a module rejects its configuration or controller resolution
/// conflicts.
pub fn build(cfg: &WardenConfig) -> anyhow::Result<Warden> {
    let dispatcher = AuthnDispatcher::new();

    let mechanism = StaticAuthnPlugin::new().init(&cfg.static_authn)?;
    dispatcher.register_mechanism(cfg.static_authn.priority, mechanism);

    let augmentor = StaticRolesPlugin::new().init(&cfg.static_roles)?;
    dispatcher.register_augmentor(cfg.static_roles.priority, augmentor);

    let authn = dispatcher.init(&cfg.authn)?;

    let gate = AuthzGate::new();
    gate.register_controller(
        None,
        Arc::new(ConfigAuthorizationController::new(cfg.authorization.clone())),
    )?;
    let authz = gate.init(&cfg.authorization)?;

    info!(
        security_providers = ?cfg.authn.security_providers,
        "Warden core wired"
    );

    Ok(Warden { authn, authz })
}

/// Caller asserted on the command line, bypassing authentication.
#[derive(Debug, Clone)]
pub struct AssertedCaller {
    pub principal: Option<String>,
    pub roles: Vec<String>,
}

impl SecurityContextOverride for AssertedCaller {
    fn principal_name(&self) -> Option<String> {
        self.principal.clone()
    }

    fn is_user_in_role(&self, role: &str) -> bool {
        self.roles.iter().any(|held| held == role)
    }
}
