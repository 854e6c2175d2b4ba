//! Configuration for the static `AuthN` mechanism plugin.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use warden_security::constants::DEFAULT_PRINCIPAL;

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticAuthnPluginConfig {
    /// Mechanism priority (lower = consulted first).
    pub priority: i32,

    /// Realm advertised in the `WWW-Authenticate` challenge.
    pub realm: String,

    /// Authentication mode.
    pub mode: AuthnMode,

    /// Default identity returned in `accept_all` mode.
    pub default_identity: IdentityConfig,

    /// Static token-to-identity mappings for `static_tokens` mode.
    pub tokens: Vec<TokenMapping>,
}

impl Default for StaticAuthnPluginConfig {
    fn default() -> Self {
        Self {
            priority: 100,
            realm: "warden".to_owned(),
            mode: AuthnMode::AcceptAll,
            default_identity: IdentityConfig::default(),
            tokens: Vec::new(),
        }
    }
}

/// Authentication mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthnMode {
    /// Accept any non-empty token and return the default identity.
    #[default]
    AcceptAll,
    /// Map specific tokens to specific identities.
    StaticTokens,
}

/// Identity produced for an accepted token.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    pub principal_name: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            principal_name: DEFAULT_PRINCIPAL.to_owned(),
            roles: Vec::new(),
            permissions: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }
}

/// Maps a static token to a specific identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenMapping {
    /// The bearer token value to match.
    pub token: String,
    /// The identity to return when this token is presented.
    pub identity: IdentityConfig,
}
