//! Static roles augmentor plugin module.

use std::sync::{Arc, OnceLock};

use authn_dispatcher_sdk::IdentityAugmentor;
use tracing::info;

use crate::config::StaticRolesPluginConfig;
use crate::domain::Service;

/// Static roles augmentor plugin module.
///
/// The host registers the returned augmentor with the dispatcher under
/// `cfg.priority`.
#[derive(Default)]
pub struct StaticRolesPlugin {
    service: OnceLock<Arc<Service>>,
}

impl StaticRolesPlugin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the augmentor from configuration.
    ///
    /// # Errors
    ///
    /// Fails if the plugin was already initialized.
    pub fn init(
        &self,
        cfg: &StaticRolesPluginConfig,
    ) -> anyhow::Result<Arc<dyn IdentityAugmentor>> {
        info!(
            priority = cfg.priority,
            skip_anonymous = cfg.skip_anonymous,
            rule_count = cfg.rules.len(),
            "Initializing static_roles_plugin"
        );

        let service = Arc::new(Service::from_config(cfg));
        self.service
            .set(service.clone())
            .map_err(|_| anyhow::anyhow!("Service already initialized"))?;

        let augmentor: Arc<dyn IdentityAugmentor> = service;
        Ok(augmentor)
    }
}
