//! Public API trait for the `AuthZ` gate.

use warden_security::IdentityRecord;

use crate::models::{Admission, RequestContext};

/// Public API trait for the `AuthZ` gate.
///
/// ```ignore
/// if !authz.check(&ctx, &identity, &["admin"]).is_admitted() {
///     return forbidden();
/// }
/// ```
pub trait AuthzGateClient: Send + Sync {
    /// Whether authorization is enforced for this request.
    fn is_enabled(&self, ctx: &RequestContext) -> bool;

    /// Admit `identity` if enforcement is off or it holds any of
    /// `required_roles`. An empty list admits every authenticated identity.
    fn check(
        &self,
        ctx: &RequestContext,
        identity: &IdentityRecord,
        required_roles: &[&str],
    ) -> Admission;
}
