#![allow(clippy::unwrap_used, clippy::expect_used)]

use warden_security::{Credential, IdentityRecord};

#[test]
fn credentials_are_never_serialized() {
    let identity = IdentityRecord::builder()
        .principal_name("alice")
        .role("admin")
        .credential(Credential::bearer("very-secret-token".to_owned()))
        .build();

    let serialized = serde_json::to_string(&identity).unwrap();

    assert!(!serialized.contains("very-secret-token"));
    assert!(!serialized.contains("credentials"));
}

#[test]
fn deserialized_identity_keeps_roles_and_attributes() {
    let identity = IdentityRecord::builder()
        .principal_name("alice")
        .roles(["admin", "user"])
        .permission("reports:export")
        .attribute("tenant", "acme")
        .credential(Credential::bearer("token".to_owned()))
        .build();

    let serialized = serde_json::to_string(&identity).unwrap();
    let restored: IdentityRecord = serde_json::from_str(&serialized).unwrap();

    assert_eq!(restored.principal_name(), "alice");
    assert_eq!(restored.roles(), identity.roles());
    assert_eq!(restored.permissions(), identity.permissions());
    assert_eq!(restored.attributes(), identity.attributes());
    assert!(restored.credentials().is_empty());
}

#[test]
fn minimal_json_deserializes_with_defaults() {
    let restored: IdentityRecord =
        serde_json::from_str(r#"{"principal_name":"service-account"}"#).unwrap();

    assert_eq!(restored.principal_name(), "service-account");
    assert!(restored.roles().is_empty());
    assert!(restored.attributes().is_empty());
}

#[test]
fn empty_principal_deserializes_as_anonymous() {
    let restored: IdentityRecord = serde_json::from_str(r#"{"principal_name":""}"#).unwrap();

    assert!(restored.is_anonymous());
    assert_eq!(restored, IdentityRecord::anonymous());
}
