//! Configuration loading for the CLI host.

use std::path::Path;

use anyhow::Context;
use authn_dispatcher::AuthnDispatcherConfig;
use authz_gate::AuthorizationConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use static_authn_plugin::StaticAuthnPluginConfig;
use static_roles_plugin::StaticRolesPluginConfig;

/// Prefix of environment variables overriding file values.
///
/// Nested keys are separated by `__`, e.g. `WARDEN__AUTHORIZATION__ENABLED=false`.
pub const ENV_PREFIX: &str = "WARDEN__";

const REDACTED: &str = "<redacted>";

/// Whole-host configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WardenConfig {
    pub authn: AuthnDispatcherConfig,
    pub authorization: AuthorizationConfig,
    pub static_authn: StaticAuthnPluginConfig,
    pub static_roles: StaticRolesPluginConfig,
}

impl WardenConfig {
    /// Merge defaults, the optional YAML file and `WARDEN__` environment variables.
    ///
    /// # Errors
    ///
    /// Fails if `path` does not exist or the merged configuration does not
    /// deserialize.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            anyhow::ensure!(
                path.is_file(),
                "configuration file {} does not exist",
                path.display()
            );
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| match path {
                Some(path) => format!("invalid configuration in {}", path.display()),
                None => "invalid configuration".to_owned(),
            })
    }

    /// Copy safe to print: static token values are masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut cfg = self.clone();
        for mapping in &mut cfg.static_authn.tokens {
            REDACTED.clone_into(&mut mapping.token);
        }
        cfg
    }
}
