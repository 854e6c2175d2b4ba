//! Service implementation for the static roles augmentor plugin.

use tracing::debug;
use warden_security::IdentityRecord;

use crate::config::{RoleRule, StaticRolesPluginConfig};

/// Static roles service.
pub struct Service {
    skip_anonymous: bool,
    rules: Vec<RoleRule>,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticRolesPluginConfig) -> Self {
        Self {
            skip_anonymous: cfg.skip_anonymous,
            rules: cfg.rules.clone(),
        }
    }

    /// Apply every matching rule to `identity`.
    ///
    /// Returns the identity unchanged when no rule matches.
    #[must_use]
    pub fn apply(&self, identity: IdentityRecord) -> IdentityRecord {
        if self.skip_anonymous && identity.is_anonymous() {
            return identity;
        }

        let principal = identity.principal_name().to_owned();
        let mut matching = self.rules.iter().filter(|r| r.matches(&principal)).peekable();
        if matching.peek().is_none() {
            return identity;
        }

        let mut builder = identity.to_builder();
        for rule in matching {
            builder = builder
                .roles(rule.roles.iter().cloned())
                .permissions(rule.permissions.iter().cloned());
            for (key, value) in &rule.attributes {
                builder = builder.attribute(key.clone(), value.clone());
            }
        }

        let identity = builder.build();
        debug!(
            principal = %principal,
            roles = ?identity.roles(),
            "Applied static role rules"
        );
        identity
    }
}
