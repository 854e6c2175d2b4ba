//! Service implementation for the static `AuthN` mechanism plugin.

use std::collections::HashMap;

use authn_dispatcher_sdk::{Challenge, MechanismError};
use warden_security::IdentityRecord;

use crate::config::{AuthnMode, IdentityConfig, StaticAuthnPluginConfig};

/// Static `AuthN` mechanism service.
///
/// Provides token-to-identity mapping based on configuration mode:
/// - `accept_all`: Any non-empty token maps to the default identity
/// - `static_tokens`: Specific tokens map to specific identities
pub struct Service {
    mode: AuthnMode,
    realm: String,
    default_identity: IdentityConfig,
    token_map: HashMap<String, IdentityConfig>,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticAuthnPluginConfig) -> Self {
        let token_map: HashMap<String, IdentityConfig> = cfg
            .tokens
            .iter()
            .map(|m| (m.token.clone(), m.identity.clone()))
            .collect();

        Self {
            mode: cfg.mode,
            realm: cfg.realm.clone(),
            default_identity: cfg.default_identity.clone(),
            token_map,
        }
    }

    /// Authenticate a bearer token and return the identity.
    ///
    /// # Errors
    ///
    /// - `MalformedCredentials` if the token is empty
    /// - `InvalidCredentials` if the token is not mapped (in `static_tokens` mode)
    pub fn authenticate_token(&self, bearer_token: &str) -> Result<IdentityRecord, MechanismError> {
        if bearer_token.is_empty() {
            return Err(MechanismError::MalformedCredentials(
                "empty bearer token".to_owned(),
            ));
        }

        let identity = match self.mode {
            AuthnMode::AcceptAll => &self.default_identity,
            AuthnMode::StaticTokens => self
                .token_map
                .get(bearer_token)
                .ok_or_else(|| MechanismError::InvalidCredentials("invalid token".to_owned()))?,
        };

        Ok(build_identity(identity))
    }

    /// Challenge returned when a request carries no usable token.
    #[must_use]
    pub fn bearer_challenge(&self) -> Challenge {
        Challenge::bearer(Some(self.realm.as_str()))
    }
}

fn build_identity(identity: &IdentityConfig) -> IdentityRecord {
    let builder = IdentityRecord::builder()
        .principal_name(identity.principal_name.clone())
        .roles(identity.roles.iter().cloned())
        .permissions(identity.permissions.iter().cloned());

    identity
        .attributes
        .iter()
        .fold(builder, |builder, (key, value)| {
            builder.attribute(key.clone(), value.clone())
        })
        .build()
}
