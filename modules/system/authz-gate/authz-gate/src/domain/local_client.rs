//! Local (in-process) client for the `AuthZ` gate.

use std::sync::Arc;

use authz_gate_sdk::{Admission, AuthzGateClient, RequestContext};
use warden_security::IdentityRecord;

use super::AuthorizationGate;

/// Local client wrapping the resolved gate.
pub struct AuthzGateLocalClient {
    gate: Arc<AuthorizationGate>,
}

impl AuthzGateLocalClient {
    #[must_use]
    pub fn new(gate: Arc<AuthorizationGate>) -> Self {
        Self { gate }
    }
}

impl AuthzGateClient for AuthzGateLocalClient {
    fn is_enabled(&self, ctx: &RequestContext) -> bool {
        self.gate.is_enabled(ctx)
    }

    fn check(
        &self,
        ctx: &RequestContext,
        identity: &IdentityRecord,
        required_roles: &[&str],
    ) -> Admission {
        self.gate.check(ctx, identity, required_roles)
    }
}
