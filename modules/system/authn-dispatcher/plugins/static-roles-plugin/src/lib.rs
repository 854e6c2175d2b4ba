#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Roles Augmentor Plugin
//!
//! Grants roles, permissions and attributes to authenticated identities from
//! configuration. Rules without a `principal` apply to every non-anonymous
//! identity.
//!
//! ## Configuration
//!
//! ```yaml
//! static_roles:
//!   priority: 10
//!   skip_anonymous: true
//!   rules:
//!     - roles: ["user"]
//!     - principal: "root"
//!       roles: ["admin"]
//!       permissions: ["config:write"]
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use config::{RoleRule, StaticRolesPluginConfig};
pub use module::StaticRolesPlugin;
