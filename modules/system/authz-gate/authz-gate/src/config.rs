//! Configuration for the `AuthZ` gate.

use serde::{Deserialize, Serialize};

/// Configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorizationConfig {
    /// Whether authorization is enforced when no controller overrides it.
    pub enabled: bool,

    /// Path prefixes never subject to authorization.
    ///
    /// Only honoured by [`ConfigAuthorizationController`](crate::ConfigAuthorizationController).
    pub unprotected_paths: Vec<String>,
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            unprotected_paths: Vec::new(),
        }
    }
}
