//! Controller resolution and role checks.

use std::sync::Arc;

use authz_gate_sdk::{Admission, AuthorizationController, RequestContext};
use tracing::{debug, info};
use warden_security::IdentityRecord;

use super::error::DomainError;

/// A controller offered to the gate, with an optional explicit priority.
#[derive(Clone)]
pub struct ControllerRegistration {
    pub priority: Option<i32>,
    pub controller: Arc<dyn AuthorizationController>,
}

impl ControllerRegistration {
    #[must_use]
    pub fn new(priority: Option<i32>, controller: Arc<dyn AuthorizationController>) -> Self {
        Self {
            priority,
            controller,
        }
    }
}

impl std::fmt::Debug for ControllerRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerRegistration")
            .field("priority", &self.priority)
            .field("controller", &self.controller.name())
            .finish()
    }
}

/// Authorization gate with exactly one active controller.
pub struct AuthorizationGate {
    controller: Arc<dyn AuthorizationController>,
}

impl AuthorizationGate {
    /// Gate driven by a single controller.
    #[must_use]
    pub fn new(controller: Arc<dyn AuthorizationController>) -> Self {
        Self { controller }
    }

    /// Pick the active controller among `registrations`.
    ///
    /// The highest explicit priority wins. Controllers without a priority
    /// rank below every explicit one. `fallback` is used when nothing is
    /// registered.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ConfigurationConflict` if several controllers
    /// share the winning rank.
    pub fn resolve(
        registrations: &[ControllerRegistration],
        fallback: Arc<dyn AuthorizationController>,
    ) -> Result<Self, DomainError> {
        let top = registrations.iter().map(|r| r.priority).max();
        let Some(top) = top else {
            info!(
                controller = fallback.name(),
                "No authorization controller registered, using default"
            );
            return Ok(Self::new(fallback));
        };

        let mut winners = registrations.iter().filter(|r| r.priority == top);
        let Some(winner) = winners.next() else {
            return Ok(Self::new(fallback));
        };

        let rest: Vec<&ControllerRegistration> = winners.collect();
        if !rest.is_empty() {
            let controllers = std::iter::once(winner)
                .chain(rest)
                .map(|r| r.controller.name().to_owned())
                .collect();
            return Err(DomainError::ConfigurationConflict {
                priority: top,
                controllers,
            });
        }

        info!(
            controller = winner.controller.name(),
            priority = ?top,
            candidates = registrations.len(),
            "Resolved authorization controller"
        );
        Ok(Self::new(winner.controller.clone()))
    }

    #[must_use]
    pub fn controller_name(&self) -> &str {
        self.controller.name()
    }

    /// Whether authorization is enforced for `ctx`.
    #[must_use]
    pub fn is_enabled(&self, ctx: &RequestContext) -> bool {
        self.controller.is_authorization_enabled(ctx)
    }

    /// Admit `identity` if enforcement is off or it holds any of `required_roles`.
    #[must_use]
    pub fn check(
        &self,
        ctx: &RequestContext,
        identity: &IdentityRecord,
        required_roles: &[&str],
    ) -> Admission {
        if !self.is_enabled(ctx) {
            debug!(request_id = %ctx.request_id, path = %ctx.path, "Authorization not enforced");
            return Admission::Admitted;
        }

        if identity.is_anonymous() {
            debug!(request_id = %ctx.request_id, path = %ctx.path, "Anonymous identity denied");
            return Admission::Unauthenticated;
        }

        if required_roles.is_empty() || required_roles.iter().any(|r| identity.has_role(r)) {
            return Admission::Admitted;
        }

        debug!(
            request_id = %ctx.request_id,
            principal = identity.principal_name(),
            required = ?required_roles,
            "Identity lacks required roles"
        );
        Admission::Forbidden {
            required_roles: required_roles.iter().map(|r| (*r).to_owned()).collect(),
        }
    }
}

impl std::fmt::Debug for AuthorizationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationGate")
            .field("controller", &self.controller.name())
            .finish()
    }
}
