//! Static `AuthN` mechanism plugin module.

use std::sync::{Arc, OnceLock};

use authn_dispatcher_sdk::AuthenticationMechanism;
use tracing::info;

use crate::config::{AuthnMode, StaticAuthnPluginConfig};
use crate::domain::Service;

/// Static `AuthN` mechanism plugin module.
///
/// Provides token-to-identity mapping from configuration. The host registers
/// the returned mechanism with the dispatcher under `cfg.priority`.
#[derive(Default)]
pub struct StaticAuthnPlugin {
    service: OnceLock<Arc<Service>>,
}

impl StaticAuthnPlugin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the mechanism from configuration.
    ///
    /// # Errors
    ///
    /// Fails if the plugin was already initialized.
    pub fn init(
        &self,
        cfg: &StaticAuthnPluginConfig,
    ) -> anyhow::Result<Arc<dyn AuthenticationMechanism>> {
        info!("Initializing static_authn_plugin");

        if cfg.mode == AuthnMode::AcceptAll {
            tracing::warn!(
                "Static AuthN plugin is running in `accept_all` mode; \
                 every bearer token is accepted with the default identity. \
                 Do NOT use this mode in production."
            );
        }

        info!(
            priority = cfg.priority,
            realm = %cfg.realm,
            mode = ?cfg.mode,
            token_count = cfg.tokens.len(),
            "Loaded plugin configuration"
        );

        let service = Arc::new(Service::from_config(cfg));
        self.service
            .set(service.clone())
            .map_err(|_| anyhow::anyhow!("Service already initialized"))?;

        let mechanism: Arc<dyn AuthenticationMechanism> = service;
        info!("Static authn plugin initialized");
        Ok(mechanism)
    }
}
