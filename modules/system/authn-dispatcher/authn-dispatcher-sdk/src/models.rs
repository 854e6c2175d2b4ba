//! Domain models for the `AuthN` dispatcher module.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warden_security::{Credential, IdentityRecord};

/// Transport-neutral authentication challenge.
///
/// Carries enough data for a host to produce a 401/403-style response
/// without the core knowing about any particular transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// HTTP-style status code (401, 403, ...).
    pub status: u16,
    /// Response headers, in insertion order (e.g. `WWW-Authenticate`).
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// Additional host-specific metadata (redirect targets, error codes, ...).
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Challenge {
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Bare 401 challenge without headers.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(401)
    }

    #[must_use]
    pub fn forbidden() -> Self {
        Self::new(403)
    }

    /// 401 challenge asking for a bearer token.
    #[must_use]
    pub fn bearer(realm: Option<&str>) -> Self {
        Self::unauthorized().with_header("WWW-Authenticate", scheme_with_realm("Bearer", realm))
    }

    /// 401 challenge asking for HTTP basic credentials.
    #[must_use]
    pub fn basic(realm: Option<&str>) -> Self {
        Self::unauthorized().with_header("WWW-Authenticate", scheme_with_realm("Basic", realm))
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// First header value with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn scheme_with_realm(scheme: &str, realm: Option<&str>) -> String {
    match realm {
        Some(realm) => format!("{scheme} realm=\"{realm}\""),
        None => scheme.to_owned(),
    }
}

/// Credential material extracted by the host from one inbound request.
#[derive(Debug, Clone)]
pub struct RequestCredentials {
    /// Correlation id for logging.
    pub request_id: Uuid,
    /// Credentials in the order the host extracted them.
    pub credentials: Vec<Credential>,
    /// Request attributes visible to mechanisms and augmentors (path, method, client address, ...).
    pub attributes: BTreeMap<String, String>,
}

impl Default for RequestCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestCredentials {
    /// Empty credential set with a fresh request id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            credentials: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    #[must_use]
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credentials.push(credential);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

/// Result of running the authentication dispatcher for one request.
#[derive(Debug, Clone)]
pub enum AuthenticationOutcome {
    /// A mechanism produced an identity.
    Authenticated(IdentityRecord),
    /// No mechanism attempted authentication.
    Unauthenticated(Challenge),
    /// A mechanism attempted authentication and rejected the credentials.
    Failed { reason: String, challenge: Challenge },
}

/// Where the identity of a request comes from.
#[derive(Debug, Clone)]
pub enum RequestIdentitySource {
    /// Authenticate the credentials through the dispatcher and augmentors.
    Credentials(RequestCredentials),
    /// A request filter already built the identity; the dispatcher is bypassed.
    Prebuilt(IdentityRecord),
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn bearer_challenge_with_realm() {
        let challenge = Challenge::bearer(Some("warden"));

        assert_eq!(challenge.status, 401);
        assert_eq!(
            challenge.header("www-authenticate"),
            Some("Bearer realm=\"warden\"")
        );
    }

    #[test]
    fn basic_challenge_without_realm() {
        let challenge = Challenge::basic(None);

        assert_eq!(challenge.header("WWW-Authenticate"), Some("Basic"));
    }

    #[test]
    fn challenge_metadata_and_headers_accumulate() {
        let challenge = Challenge::forbidden()
            .with_header("X-Reason", "mfa-required")
            .with_metadata("redirect", "/login/mfa");

        assert_eq!(challenge.status, 403);
        assert_eq!(challenge.header("x-reason"), Some("mfa-required"));
        assert_eq!(
            challenge.metadata.get("redirect").map(String::as_str),
            Some("/login/mfa")
        );
    }

    #[test]
    fn request_credentials_start_empty_with_unique_ids() {
        let a = RequestCredentials::new();
        let b = RequestCredentials::new();

        assert!(a.is_empty());
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn request_credentials_collect_material() {
        let request = RequestCredentials::new()
            .with_credential(Credential::bearer("token".to_owned()))
            .with_attribute("path", "/admin");

        assert!(!request.is_empty());
        assert_eq!(request.attributes.get("path").map(String::as_str), Some("/admin"));
    }
}
