//! Authorization controller contract.

use crate::models::RequestContext;

/// Decides per request whether authorization is enforced.
///
/// Exactly one controller is active for the process. Implementations may
/// read external configuration on every call, so the answer can change
/// between requests.
pub trait AuthorizationController: Send + Sync {
    /// Name used in logs and in `ConfigurationConflict` errors.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn is_authorization_enabled(&self, ctx: &RequestContext) -> bool;
}
