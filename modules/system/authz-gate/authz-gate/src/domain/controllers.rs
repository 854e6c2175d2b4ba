//! Built-in authorization controllers.

use std::sync::Arc;

use arc_swap::ArcSwap;
use authz_gate_sdk::{AuthorizationController, RequestContext};
use tracing::debug;

use crate::config::AuthorizationConfig;

/// Constant decision taken from configuration at startup.
#[derive(Debug, Clone, Copy)]
pub struct DefaultAuthorizationController {
    enabled: bool,
}

impl DefaultAuthorizationController {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    #[must_use]
    pub fn from_config(cfg: &AuthorizationConfig) -> Self {
        Self::new(cfg.enabled)
    }
}

impl Default for DefaultAuthorizationController {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AuthorizationController for DefaultAuthorizationController {
    fn name(&self) -> &str {
        "default"
    }

    fn is_authorization_enabled(&self, _ctx: &RequestContext) -> bool {
        self.enabled
    }
}

/// Decision read from hot-swappable configuration on every call.
///
/// Clones share the same configuration, so a test or an admin endpoint can
/// keep one handle and toggle enforcement for subsequent requests.
#[derive(Debug, Clone)]
pub struct ConfigAuthorizationController {
    config: Arc<ArcSwap<AuthorizationConfig>>,
}

impl ConfigAuthorizationController {
    #[must_use]
    pub fn new(cfg: AuthorizationConfig) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(cfg)),
        }
    }

    /// Replace the whole configuration.
    pub fn store(&self, cfg: AuthorizationConfig) {
        debug!(enabled = cfg.enabled, "Authorization configuration replaced");
        self.config.store(Arc::new(cfg));
    }

    /// Toggle enforcement, keeping the rest of the configuration.
    pub fn set_enabled(&self, enabled: bool) {
        self.config.rcu(|current| AuthorizationConfig {
            enabled,
            ..AuthorizationConfig::clone(current)
        });
        debug!(enabled, "Authorization enforcement toggled");
    }

    #[must_use]
    pub fn current(&self) -> Arc<AuthorizationConfig> {
        self.config.load_full()
    }
}

impl AuthorizationController for ConfigAuthorizationController {
    fn name(&self) -> &str {
        "config"
    }

    fn is_authorization_enabled(&self, ctx: &RequestContext) -> bool {
        let cfg = self.config.load();
        cfg.enabled
            && !cfg
                .unprotected_paths
                .iter()
                .any(|prefix| ctx.path.starts_with(prefix.as_str()))
    }
}
