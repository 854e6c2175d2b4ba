use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::constants::ANONYMOUS_PRINCIPAL;
use crate::credential::Credential;

/// `IdentityRecord` is the authenticated (or anonymous) identity of a request.
///
/// Produced by an authentication mechanism, enriched by augmentors and finally
/// consulted for admission decisions. Records are immutable: every edit goes
/// through [`IdentityRecord::to_builder`] and yields a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Principal name; [`ANONYMOUS_PRINCIPAL`] for anonymous identities.
    principal_name: String,
    /// Role names granted to the principal.
    #[serde(default)]
    roles: BTreeSet<String>,
    /// Permission strings granted to the principal.
    #[serde(default)]
    permissions: BTreeSet<String>,
    /// Arbitrary typed attributes keyed by name.
    #[serde(default)]
    attributes: BTreeMap<String, serde_json::Value>,
    /// Credentials used to authenticate, in presentation order. Never serialized.
    #[serde(skip)]
    credentials: Vec<Credential>,
}

impl IdentityRecord {
    /// Create a new `IdentityRecord` builder
    #[must_use]
    pub fn builder() -> IdentityRecordBuilder {
        IdentityRecordBuilder::default()
    }

    /// Create an anonymous `IdentityRecord` with no roles, attributes or credentials
    #[must_use]
    pub fn anonymous() -> Self {
        IdentityRecordBuilder::default().build()
    }

    /// Start a builder pre-populated with this record's data.
    ///
    /// The record itself is left untouched.
    #[must_use]
    pub fn to_builder(&self) -> IdentityRecordBuilder {
        IdentityRecordBuilder {
            principal_name: self.principal_name.clone(),
            roles: self.roles.clone(),
            permissions: self.permissions.clone(),
            attributes: self.attributes.clone(),
            credentials: self.credentials.clone(),
        }
    }

    #[must_use]
    pub fn principal_name(&self) -> &str {
        &self.principal_name
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.principal_name == ANONYMOUS_PRINCIPAL
    }

    #[must_use]
    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    #[must_use]
    pub fn permissions(&self) -> &BTreeSet<String> {
        &self.permissions
    }

    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }

    #[must_use]
    pub fn credentials(&self) -> &[Credential] {
        &self.credentials
    }
}

#[derive(Debug, Default)]
pub struct IdentityRecordBuilder {
    principal_name: String,
    roles: BTreeSet<String>,
    permissions: BTreeSet<String>,
    attributes: BTreeMap<String, serde_json::Value>,
    credentials: Vec<Credential>,
}

impl IdentityRecordBuilder {
    #[must_use]
    pub fn principal_name(mut self, principal_name: impl Into<String>) -> Self {
        self.principal_name = principal_name.into();
        self
    }

    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    #[must_use]
    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn without_role(mut self, role: &str) -> Self {
        self.roles.remove(role);
        self
    }

    #[must_use]
    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    #[must_use]
    pub fn permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Set an attribute, replacing any previous value under the same key.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn without_attribute(mut self, key: &str) -> Self {
        self.attributes.remove(key);
        self
    }

    #[must_use]
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credentials.push(credential);
        self
    }

    #[must_use]
    pub fn build(self) -> IdentityRecord {
        IdentityRecord {
            principal_name: self.principal_name,
            roles: self.roles,
            permissions: self.permissions,
            attributes: self.attributes,
            credentials: self.credentials,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_identity_builder_full() {
        let identity = IdentityRecord::builder()
            .principal_name("alice")
            .roles(["reader", "writer"])
            .permission("documents:read")
            .attribute("department", "engineering")
            .attribute("level", 3)
            .credential(Credential::bearer("alice-token".to_owned()))
            .build();

        assert_eq!(identity.principal_name(), "alice");
        assert!(!identity.is_anonymous());
        assert!(identity.has_role("reader"));
        assert!(identity.has_role("writer"));
        assert!(identity.has_permission("documents:read"));
        assert_eq!(
            identity.attribute("department"),
            Some(&serde_json::json!("engineering"))
        );
        assert_eq!(identity.attribute("level"), Some(&serde_json::json!(3)));
        assert_eq!(identity.credentials().len(), 1);
        assert_eq!(
            identity.credentials()[0].secret().expose_secret(),
            "alice-token"
        );
    }

    #[test]
    fn test_identity_anonymous() {
        let identity = IdentityRecord::anonymous();

        assert!(identity.is_anonymous());
        assert_eq!(identity.principal_name(), ANONYMOUS_PRINCIPAL);
        assert!(identity.roles().is_empty());
        assert!(identity.permissions().is_empty());
        assert!(identity.attributes().is_empty());
        assert!(identity.credentials().is_empty());
    }

    #[test]
    fn test_roles_are_deduplicated() {
        let identity = IdentityRecord::builder()
            .principal_name("bob")
            .role("admin")
            .role("admin")
            .roles(vec!["admin".to_owned(), "user".to_owned()])
            .build();

        assert_eq!(identity.roles().len(), 2);
    }

    #[test]
    fn test_to_builder_leaves_source_untouched() {
        let original = IdentityRecord::builder()
            .principal_name("carol")
            .role("user")
            .attribute("team", "blue")
            .build();

        let derived = original
            .to_builder()
            .role("admin")
            .without_role("user")
            .without_attribute("team")
            .build();

        assert!(original.has_role("user"));
        assert!(!original.has_role("admin"));
        assert_eq!(original.attribute("team"), Some(&serde_json::json!("blue")));

        assert!(derived.has_role("admin"));
        assert!(!derived.has_role("user"));
        assert!(derived.attribute("team").is_none());
        assert_eq!(derived.principal_name(), "carol");
    }

    #[test]
    fn test_attribute_overwrite_keeps_single_key() {
        let identity = IdentityRecord::builder()
            .principal_name("dave")
            .attribute("quota", 10)
            .attribute("quota", 20)
            .build();

        assert_eq!(identity.attributes().len(), 1);
        assert_eq!(identity.attribute("quota"), Some(&serde_json::json!(20)));
    }

    #[test]
    fn test_credentials_keep_presentation_order() {
        let identity = IdentityRecord::builder()
            .principal_name("erin")
            .credential(Credential::bearer("first".to_owned()))
            .credential(Credential::bearer("second".to_owned()))
            .build();

        let secrets: Vec<&str> = identity
            .credentials()
            .iter()
            .map(|c| c.secret().expose_secret())
            .collect();
        assert_eq!(secrets, ["first", "second"]);
    }

    #[test]
    fn test_clone_is_equal() {
        let identity = IdentityRecord::builder()
            .principal_name("frank")
            .role("ops")
            .credential(Credential::bearer("secret".to_owned()))
            .build();

        assert_eq!(identity.clone(), identity);
    }
}
