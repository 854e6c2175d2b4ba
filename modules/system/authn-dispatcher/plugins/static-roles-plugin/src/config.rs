//! Configuration for the static roles augmentor plugin.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticRolesPluginConfig {
    /// Augmentor priority (lower = runs earlier).
    pub priority: i32,

    /// Leave anonymous identities untouched.
    pub skip_anonymous: bool,

    /// Grants applied in order to every matching identity.
    pub rules: Vec<RoleRule>,
}

impl Default for StaticRolesPluginConfig {
    fn default() -> Self {
        Self {
            priority: 100,
            skip_anonymous: true,
            rules: Vec::new(),
        }
    }
}

/// Grants for one principal, or for everyone when `principal` is unset.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoleRule {
    pub principal: Option<String>,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl RoleRule {
    #[must_use]
    pub fn matches(&self, principal_name: &str) -> bool {
        self.principal
            .as_deref()
            .is_none_or(|expected| expected == principal_name)
    }
}
