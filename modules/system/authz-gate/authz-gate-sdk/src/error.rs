//! Error types for the `AuthZ` gate module.

use thiserror::Error;

/// Errors that can occur when setting up the `AuthZ` gate.
///
/// Access denial is expressed via [`Admission`](crate::Admission), not as an
/// error variant.
#[derive(Debug, Error)]
pub enum AuthzGateError {
    /// Several controllers share the winning priority.
    ///
    /// `priority` is `None` when the tie is between controllers registered
    /// without an explicit priority.
    #[error("controllers {controllers:?} tie on priority {priority:?}")]
    ConfigurationConflict {
        priority: Option<i32>,
        controllers: Vec<String>,
    },

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthzGateError {
    /// Both variants are server-side faults.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ConfigurationConflict { .. } | Self::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn conflict_message_names_controllers() {
        let err = AuthzGateError::ConfigurationConflict {
            priority: Some(10),
            controllers: vec!["a".to_owned(), "b".to_owned()],
        };

        let message = err.to_string();
        assert!(message.contains("\"a\""));
        assert!(message.contains("\"b\""));
        assert!(message.contains("Some(10)"));
        assert_eq!(err.status_code(), 500);
    }
}
