#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static `AuthN` Mechanism Plugin
//!
//! This plugin provides static token-to-identity mapping for development and testing.
//!
//! ## Modes
//!
//! - **`accept_all`** (default): Accepts any non-empty bearer token, returns the configured
//!   default identity.
//!
//! - **`static_tokens`**: Maps specific tokens to specific identities. Useful for E2E tests
//!   with distinct users.
//!
//! ## Configuration
//!
//! ```yaml
//! static_authn:
//!   priority: 100
//!   realm: "warden"
//!   mode: static_tokens
//!   default_identity:
//!     principal_name: "dev-user"
//!     roles: ["user"]
//!   tokens:
//!     - token: "root"
//!       identity:
//!         principal_name: "root"
//!         roles: ["admin"]
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use config::{AuthnMode, IdentityConfig, StaticAuthnPluginConfig, TokenMapping};
pub use module::StaticAuthnPlugin;
