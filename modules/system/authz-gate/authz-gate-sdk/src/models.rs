//! Models for the `AuthZ` gate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What the gate knows about the request being authorized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl RequestContext {
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            method: method.into(),
            path: path.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Result of checking an identity against required roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Admission {
    /// Enforcement is off, or the identity holds a required role.
    Admitted,
    /// The identity is anonymous.
    Unauthenticated,
    /// The identity holds none of the required roles.
    Forbidden { required_roles: Vec<String> },
}

impl Admission {
    #[must_use]
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted)
    }

    /// HTTP-style status a host would answer with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Admitted => 200,
            Self::Unauthenticated => 401,
            Self::Forbidden { .. } => 403,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn admission_status_codes() {
        assert_eq!(Admission::Admitted.status_code(), 200);
        assert_eq!(Admission::Unauthenticated.status_code(), 401);
        assert_eq!(
            Admission::Forbidden {
                required_roles: vec!["admin".to_owned()]
            }
            .status_code(),
            403
        );
        assert!(Admission::Admitted.is_admitted());
        assert!(!Admission::Unauthenticated.is_admitted());
    }

    #[test]
    fn admission_serializes_with_decision_tag() {
        let json = serde_json::to_value(Admission::Forbidden {
            required_roles: vec!["admin".to_owned()],
        })
        .unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "decision": "forbidden", "required_roles": ["admin"] })
        );
    }

    #[test]
    fn request_context_attributes() {
        let ctx = RequestContext::new("POST", "/orders")
            .with_request_id(Uuid::nil())
            .with_attribute("tenant", "acme");

        assert_eq!(ctx.request_id, Uuid::nil());
        assert_eq!(ctx.attribute("tenant"), Some("acme"));
        assert_eq!(ctx.attribute("missing"), None);
    }
}
