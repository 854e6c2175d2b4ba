#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use authn_dispatcher::{AuthnDispatcher, AuthnDispatcherConfig};
use authn_dispatcher_sdk::{
    AuthnDispatcherClient, AuthnDispatcherError, FnAugmentor, RequestCredentials,
    RequestIdentitySource,
};
use serde_json::json;
use static_authn_plugin::{StaticAuthnPlugin, StaticAuthnPluginConfig};
use static_roles_plugin::{StaticRolesPlugin, StaticRolesPluginConfig};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use warden_security::{Credential, IdentityRecord};

fn static_tokens_config() -> StaticAuthnPluginConfig {
    serde_json::from_value(json!({
        "priority": 10,
        "realm": "integration",
        "mode": "static_tokens",
        "tokens": [
            { "token": "root", "identity": { "principal_name": "root" } },
            { "token": "alice-token", "identity": { "principal_name": "alice", "roles": ["reader"] } }
        ]
    }))
    .unwrap()
}

fn static_roles_config() -> StaticRolesPluginConfig {
    serde_json::from_value(json!({
        "priority": 5,
        "rules": [
            { "roles": ["user"] },
            { "principal": "root", "roles": ["admin"], "permissions": ["config:write"] }
        ]
    }))
    .unwrap()
}

fn build_client() -> Arc<dyn AuthnDispatcherClient> {
    let module = AuthnDispatcher::new();

    let authn_cfg = static_tokens_config();
    let mechanism = StaticAuthnPlugin::new().init(&authn_cfg).unwrap();
    module.register_mechanism(authn_cfg.priority, mechanism);

    let roles_cfg = static_roles_config();
    let augmentor = StaticRolesPlugin::new().init(&roles_cfg).unwrap();
    module.register_augmentor(roles_cfg.priority, augmentor);

    module.init(&AuthnDispatcherConfig::default()).unwrap()
}

fn bearer(token: &str) -> RequestCredentials {
    RequestCredentials::new().with_credential(Credential::bearer(token.to_owned()))
}

#[tokio::test]
async fn root_token_is_authenticated_and_augmented() {
    let client = build_client();

    let identity = client.authenticate_and_augment(bearer("root")).await.unwrap();

    assert_eq!(identity.principal_name(), "root");
    assert!(identity.has_role("user"));
    assert!(identity.has_role("admin"));
    assert!(identity.has_permission("config:write"));
    assert_eq!(identity.credentials().len(), 1);
}

#[tokio::test]
async fn mapped_roles_and_augmented_roles_merge() {
    let client = build_client();

    let identity = client
        .authenticate_and_augment(bearer("alice-token"))
        .await
        .unwrap();

    assert_eq!(identity.principal_name(), "alice");
    assert!(identity.has_role("reader"));
    assert!(identity.has_role("user"));
    assert!(!identity.has_role("admin"));
}

#[tokio::test]
async fn unknown_token_fails_with_bearer_challenge() {
    let client = build_client();

    let err = client
        .authenticate_and_augment(bearer("nope"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthnDispatcherError::AuthenticationFailed { .. }));
    assert_eq!(err.status_code(), 401);
    let challenge = err.challenge().expect("challenge must be present");
    assert_eq!(
        challenge.header("WWW-Authenticate"),
        Some("Bearer realm=\"integration\"")
    );
}

#[tokio::test]
async fn missing_credentials_are_unauthenticated() {
    let client = build_client();

    let err = client
        .authenticate_and_augment(RequestCredentials::new().with_request_id(Uuid::nil()))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthnDispatcherError::Unauthenticated { .. }));
    assert_eq!(err.status_code(), 401);
}

#[tokio::test]
async fn augmentor_failure_produces_no_identity() {
    let module = AuthnDispatcher::new();
    let authn_cfg = static_tokens_config();
    module.register_mechanism(
        authn_cfg.priority,
        StaticAuthnPlugin::new().init(&authn_cfg).unwrap(),
    );
    module.register_augmentor(0, Arc::new(FailingLookup));
    let client = module.init(&AuthnDispatcherConfig::default()).unwrap();

    let err = client
        .authenticate_and_augment(bearer("root"))
        .await
        .unwrap_err();

    match err {
        AuthnDispatcherError::AugmentorFailure { ref augmentor, .. } => {
            assert_eq!(augmentor, "failing-lookup");
        }
        ref other => panic!("Expected AugmentorFailure, got: {other:?}"),
    }
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn prebuilt_identity_skips_mechanisms_and_augmentors() {
    let client = build_client();
    let prebuilt = IdentityRecord::builder()
        .principal_name("batch-job")
        .role("system")
        .build();

    let identity = client
        .resolve(RequestIdentitySource::Prebuilt(prebuilt.clone()))
        .await
        .unwrap();

    assert_eq!(identity, prebuilt);
    assert!(!identity.has_role("user"));
}

#[tokio::test]
async fn augmentor_registered_after_init_applies_to_later_requests() {
    let module = AuthnDispatcher::new();
    let authn_cfg = static_tokens_config();
    module.register_mechanism(
        authn_cfg.priority,
        StaticAuthnPlugin::new().init(&authn_cfg).unwrap(),
    );
    let client = module.init(&AuthnDispatcherConfig::default()).unwrap();

    let before = client.authenticate_and_augment(bearer("root")).await.unwrap();
    assert!(!before.has_role("late"));

    module.register_augmentor(
        50,
        Arc::new(FnAugmentor::new("late-role", |identity: IdentityRecord| {
            identity.to_builder().role("late").build()
        })),
    );

    let after = client.authenticate_and_augment(bearer("root")).await.unwrap();
    assert!(after.has_role("late"));
}

struct FailingLookup;

#[async_trait::async_trait]
impl authn_dispatcher_sdk::IdentityAugmentor for FailingLookup {
    fn name(&self) -> &str {
        "failing-lookup"
    }

    async fn augment(
        &self,
        _identity: IdentityRecord,
        ctx: &authn_dispatcher_sdk::AugmentationContext,
    ) -> Result<IdentityRecord, authn_dispatcher_sdk::AugmentorError> {
        let reachable = ctx.run_blocking(|| false).await?;
        assert!(!reachable);
        Err(authn_dispatcher_sdk::AugmentorError::Lookup(
            "directory unreachable".to_owned(),
        ))
    }
}

#[tokio::test]
async fn cancelled_request_reports_cancellation_to_the_host() {
    let client = build_client();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client
        .authenticate_and_augment_with_cancellation(bearer("root"), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, AuthnDispatcherError::Cancelled));
    assert_eq!(err.status_code(), 503);
    assert!(err.challenge().is_none());
}

#[tokio::test]
async fn uncancelled_token_lets_the_request_complete() {
    let client = build_client();

    let identity = client
        .authenticate_and_augment_with_cancellation(bearer("root"), &CancellationToken::new())
        .await
        .unwrap();

    assert!(identity.has_role("admin"));
}
