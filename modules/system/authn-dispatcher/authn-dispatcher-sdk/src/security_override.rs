//! Security-context override contract.
//!
//! A host request filter running before route matching may already know who
//! the caller is. It supplies a principal and a role check; the core turns
//! them into an [`IdentityRecord`] and bypasses the dispatcher for that
//! request.

use warden_security::IdentityRecord;
use warden_security::constants::OVERRIDE_ATTRIBUTE;

/// Principal and role check supplied by a host request filter.
pub trait SecurityContextOverride: Send + Sync {
    /// Name of the caller, `None` for anonymous callers.
    fn principal_name(&self) -> Option<String>;

    /// Whether the caller holds `role`.
    fn is_user_in_role(&self, role: &str) -> bool;

    /// Build the identity, materialising the `candidate_roles` the caller holds.
    ///
    /// A role check cannot be enumerated, so only the roles the host names
    /// end up in the record.
    fn to_identity(&self, candidate_roles: &[&str]) -> IdentityRecord {
        let Some(principal) = self.principal_name() else {
            return IdentityRecord::anonymous();
        };

        candidate_roles
            .iter()
            .filter(|role| self.is_user_in_role(role))
            .fold(
                IdentityRecord::builder()
                    .principal_name(principal)
                    .attribute(OVERRIDE_ATTRIBUTE, true),
                |builder, role| builder.role(*role),
            )
            .build()
    }
}
