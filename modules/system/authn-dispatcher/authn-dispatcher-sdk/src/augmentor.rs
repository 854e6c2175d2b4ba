//! Plugin API trait for identity augmentors.
//!
//! Augmentors enrich an authenticated identity with roles, permissions and
//! attributes. They run strictly one after another in ascending priority
//! order; each one receives the record produced by the previous one.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use warden_security::IdentityRecord;

use crate::error::AugmentorError;

/// Per-request data handed to every augmentor.
#[derive(Debug, Clone)]
pub struct AugmentationContext {
    request_id: Uuid,
    attributes: Arc<BTreeMap<String, String>>,
}

impl AugmentationContext {
    #[must_use]
    pub fn new(request_id: Uuid, attributes: BTreeMap<String, String>) -> Self {
        Self {
            request_id,
            attributes: Arc::new(attributes),
        }
    }

    #[must_use]
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Run blocking work (directory lookups, synchronous clients) on the
    /// blocking thread pool and wait for it.
    ///
    /// The calling augmentor stays suspended until `work` finishes, so the
    /// next augmentor never starts early.
    ///
    /// # Errors
    ///
    /// Returns `AugmentorError::BlockingTask` if `work` panicked or the task
    /// was aborted.
    #[allow(clippy::unused_self)] // Reached through the context augmentors already hold
    pub async fn run_blocking<F, T>(&self, work: F) -> Result<T, AugmentorError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(work)
            .await
            .map_err(|e| AugmentorError::BlockingTask(e.to_string()))
    }
}

impl Default for AugmentationContext {
    fn default() -> Self {
        Self::new(Uuid::nil(), BTreeMap::new())
    }
}

/// Plugin API trait for identity augmentors.
///
/// An augmentor takes ownership of the identity and returns either the same
/// record unchanged or a new one built with
/// [`IdentityRecord::to_builder`]. Whether anonymous identities are
/// augmented is the augmentor's own decision.
#[async_trait]
pub trait IdentityAugmentor: Send + Sync {
    /// Name used in logs and in `AugmentorFailure` errors.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Produce the augmented identity.
    ///
    /// # Errors
    ///
    /// Any error aborts the pipeline; later augmentors do not run.
    async fn augment(
        &self,
        identity: IdentityRecord,
        ctx: &AugmentationContext,
    ) -> Result<IdentityRecord, AugmentorError>;
}

/// Augmentor backed by a synchronous closure.
///
/// ```ignore
/// let dummy = FnAugmentor::new("dummy-role", |identity| {
///     if identity.is_anonymous() {
///         identity
///     } else {
///         identity.to_builder().role("dummy").build()
///     }
/// });
/// ```
pub struct FnAugmentor<F> {
    name: String,
    augment: F,
}

impl<F> FnAugmentor<F>
where
    F: Fn(IdentityRecord) -> IdentityRecord + Send + Sync,
{
    #[must_use]
    pub fn new(name: impl Into<String>, augment: F) -> Self {
        Self {
            name: name.into(),
            augment,
        }
    }
}

#[async_trait]
impl<F> IdentityAugmentor for FnAugmentor<F>
where
    F: Fn(IdentityRecord) -> IdentityRecord + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn augment(
        &self,
        identity: IdentityRecord,
        _ctx: &AugmentationContext,
    ) -> Result<IdentityRecord, AugmentorError> {
        Ok((self.augment)(identity))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fn_augmentor_applies_closure() {
        let augmentor = FnAugmentor::new("add-user", |identity: IdentityRecord| {
            identity.to_builder().role("user").build()
        });

        let identity = IdentityRecord::builder().principal_name("alice").build();
        let augmented = augmentor
            .augment(identity, &AugmentationContext::default())
            .await
            .unwrap();

        assert_eq!(augmentor.name(), "add-user");
        assert!(augmented.has_role("user"));
    }

    #[tokio::test]
    async fn run_blocking_returns_work_result() {
        let ctx = AugmentationContext::default();

        let value = ctx.run_blocking(|| 40 + 2).await.unwrap();

        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn run_blocking_reports_panics() {
        let ctx = AugmentationContext::default();

        let result: Result<(), _> = ctx
            .run_blocking(|| panic!("directory lookup exploded"))
            .await;

        assert!(matches!(result, Err(AugmentorError::BlockingTask(_))));
    }

    #[test]
    fn context_exposes_request_attributes() {
        let request_id = Uuid::new_v4();
        let ctx = AugmentationContext::new(
            request_id,
            BTreeMap::from([("path".to_owned(), "/admin".to_owned())]),
        );

        assert_eq!(ctx.request_id(), request_id);
        assert_eq!(ctx.attribute("path"), Some("/admin"));
        assert!(ctx.attribute("method").is_none());
    }
}
