//! Configuration for the `AuthN` dispatcher.

use serde::{Deserialize, Serialize};

/// Configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthnDispatcherConfig {
    /// Security providers the host activates at startup.
    ///
    /// Passed through to the host untouched; the dispatcher only exposes
    /// the list.
    pub security_providers: Vec<String>,
}
