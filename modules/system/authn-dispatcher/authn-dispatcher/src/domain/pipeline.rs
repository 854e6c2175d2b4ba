//! Sequential identity augmentation.

use std::sync::Arc;

use authn_dispatcher_sdk::AugmentationContext;
use tracing::{debug, error};
use warden_security::IdentityRecord;

use super::error::DomainError;
use super::registry::AugmentorRegistry;

/// Left fold of the registered augmentors over an identity.
///
/// Augmentors run one at a time in ascending priority order. The first
/// failure aborts the fold and no later augmentor runs.
#[derive(Debug, Clone)]
pub struct AugmentationPipeline {
    augmentors: Arc<AugmentorRegistry>,
}

impl AugmentationPipeline {
    #[must_use]
    pub fn new(augmentors: Arc<AugmentorRegistry>) -> Self {
        Self { augmentors }
    }

    /// Run every augmentor registered at call time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AugmentorFailed` naming the first augmentor that failed.
    #[tracing::instrument(
        skip_all,
        fields(request_id = %ctx.request_id(), principal = identity.principal_name())
    )]
    pub async fn run(
        &self,
        identity: IdentityRecord,
        ctx: &AugmentationContext,
    ) -> Result<IdentityRecord, DomainError> {
        let augmentors = self.augmentors.snapshot();
        let mut current = identity;

        for entry in augmentors.iter() {
            debug!(
                augmentor = entry.name(),
                priority = entry.priority(),
                "Running augmentor"
            );
            current = entry
                .item()
                .augment(current, ctx)
                .await
                .map_err(|e| {
                    error!(augmentor = entry.name(), error = %e, "Augmentor failed");
                    DomainError::AugmentorFailed {
                        augmentor: entry.name().to_owned(),
                        reason: e.to_string(),
                    }
                })?;
        }

        debug!(
            augmentors = augmentors.len(),
            roles = current.roles().len(),
            "Augmentation complete"
        );
        Ok(current)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use authn_dispatcher_sdk::{AugmentorError, FnAugmentor, IdentityAugmentor};

    use super::*;

    struct Recording {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl IdentityAugmentor for Recording {
        fn name(&self) -> &str {
            self.name
        }

        async fn augment(
            &self,
            identity: IdentityRecord,
            _ctx: &AugmentationContext,
        ) -> Result<IdentityRecord, AugmentorError> {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.name, identity.roles().len()));
            Ok(identity.to_builder().role(self.name).build())
        }
    }

    struct Failing;

    #[async_trait]
    impl IdentityAugmentor for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        async fn augment(
            &self,
            _identity: IdentityRecord,
            _ctx: &AugmentationContext,
        ) -> Result<IdentityRecord, AugmentorError> {
            Err(AugmentorError::Lookup("directory offline".to_owned()))
        }
    }

    struct Counting(AtomicUsize);

    #[async_trait]
    impl IdentityAugmentor for Counting {
        async fn augment(
            &self,
            identity: IdentityRecord,
            _ctx: &AugmentationContext,
        ) -> Result<IdentityRecord, AugmentorError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(identity)
        }
    }

    fn alice() -> IdentityRecord {
        IdentityRecord::builder().principal_name("alice").build()
    }

    #[tokio::test]
    async fn augmentors_run_in_priority_order_and_see_previous_output() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = Arc::new(AugmentorRegistry::new());
        registry.register_augmentor(
            20,
            Arc::new(Recording {
                name: "second",
                log: log.clone(),
            }),
        );
        registry.register_augmentor(
            10,
            Arc::new(Recording {
                name: "first",
                log: log.clone(),
            }),
        );

        let pipeline = AugmentationPipeline::new(registry);
        let identity = pipeline
            .run(alice(), &AugmentationContext::default())
            .await
            .unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["first:0", "second:1"]);
        assert!(identity.has_role("first"));
        assert!(identity.has_role("second"));
        assert_eq!(identity.principal_name(), "alice");
    }

    #[tokio::test]
    async fn empty_registry_returns_identity_unchanged() {
        let pipeline = AugmentationPipeline::new(Arc::new(AugmentorRegistry::new()));

        let identity = pipeline
            .run(alice(), &AugmentationContext::default())
            .await
            .unwrap();

        assert_eq!(identity, alice());
    }

    #[tokio::test]
    async fn failure_aborts_the_fold() {
        let after = Arc::new(Counting(AtomicUsize::new(0)));
        let registry = Arc::new(AugmentorRegistry::new());
        registry.register_augmentor(1, Arc::new(Failing));
        registry.register_augmentor(2, after.clone());

        let pipeline = AugmentationPipeline::new(registry);
        let err = pipeline
            .run(alice(), &AugmentationContext::default())
            .await
            .unwrap_err();

        match err {
            DomainError::AugmentorFailed { augmentor, reason } => {
                assert_eq!(augmentor, "failing");
                assert!(reason.contains("directory offline"));
            }
            other => panic!("Expected AugmentorFailed, got: {other:?}"),
        }
        assert_eq!(after.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn augmentor_may_leave_anonymous_identity_untouched() {
        let registry = Arc::new(AugmentorRegistry::new());
        registry.register_augmentor(
            0,
            Arc::new(FnAugmentor::new("dummy-role", |identity: IdentityRecord| {
                if identity.is_anonymous() {
                    identity
                } else {
                    identity.to_builder().role("dummy").build()
                }
            })),
        );

        let pipeline = AugmentationPipeline::new(registry);
        let identity = pipeline
            .run(IdentityRecord::anonymous(), &AugmentationContext::default())
            .await
            .unwrap();

        assert_eq!(identity, IdentityRecord::anonymous());
        assert!(identity.roles().is_empty());
    }

    fn dummy_unless_anonymous() -> Arc<dyn IdentityAugmentor> {
        Arc::new(FnAugmentor::new("dummy-role", |identity: IdentityRecord| {
            if identity.is_anonymous() {
                identity
            } else {
                identity.to_builder().role("dummy").build()
            }
        }))
    }

    #[tokio::test]
    async fn root_gains_dummy_then_admin() {
        let admin_saw_dummy = Arc::new(AtomicBool::new(false));
        let seen = admin_saw_dummy.clone();
        let registry = Arc::new(AugmentorRegistry::new());
        registry.register_augmentor(
            5,
            Arc::new(FnAugmentor::new("admin-role", move |identity: IdentityRecord| {
                seen.store(identity.has_role("dummy"), Ordering::SeqCst);
                if identity.principal_name() == "root" {
                    identity.to_builder().role("admin").build()
                } else {
                    identity
                }
            })),
        );
        registry.register_augmentor(0, dummy_unless_anonymous());

        let pipeline = AugmentationPipeline::new(registry);
        let root = IdentityRecord::builder().principal_name("root").build();
        let identity = pipeline
            .run(root, &AugmentationContext::default())
            .await
            .unwrap();

        assert_eq!(
            identity.roles(),
            &BTreeSet::from(["dummy".to_owned(), "admin".to_owned()])
        );
        assert!(admin_saw_dummy.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn anonymous_identity_passes_through_identical() {
        let registry = Arc::new(AugmentorRegistry::new());
        registry.register_augmentor(0, dummy_unless_anonymous());
        let anonymous = IdentityRecord::builder()
            .attribute("client", "kiosk")
            .build();
        assert!(anonymous.is_anonymous());

        let pipeline = AugmentationPipeline::new(registry);
        let identity = pipeline
            .run(anonymous.clone(), &AugmentationContext::default())
            .await
            .unwrap();

        assert_eq!(identity, anonymous);
    }
}
