//! Augmentor implementation for the static roles plugin.

use async_trait::async_trait;
use authn_dispatcher_sdk::{AugmentationContext, AugmentorError, IdentityAugmentor};
use warden_security::IdentityRecord;

use super::service::Service;

#[async_trait]
impl IdentityAugmentor for Service {
    fn name(&self) -> &str {
        "static-roles"
    }

    async fn augment(
        &self,
        identity: IdentityRecord,
        _ctx: &AugmentationContext,
    ) -> Result<IdentityRecord, AugmentorError> {
        Ok(self.apply(identity))
    }
}
