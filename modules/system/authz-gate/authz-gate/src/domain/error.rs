//! Domain errors for the `AuthZ` gate.

use authz_gate_sdk::AuthzGateError;

/// Internal domain errors.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("controllers {controllers:?} tie on priority {priority:?}")]
    ConfigurationConflict {
        priority: Option<i32>,
        controllers: Vec<String>,
    },
}

impl From<DomainError> for AuthzGateError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::ConfigurationConflict {
                priority,
                controllers,
            } => Self::ConfigurationConflict {
                priority,
                controllers,
            },
        }
    }
}
