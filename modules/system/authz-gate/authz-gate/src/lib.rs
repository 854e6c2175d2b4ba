//! `AuthZ` Gate Module
//!
//! Resolves the single active [`AuthorizationController`] at startup and
//! answers, per request, whether authorization is enforced.
//!
//! [`AuthorizationController`]: authz_gate_sdk::AuthorizationController
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use config::AuthorizationConfig;
pub use domain::{
    AuthorizationGate, AuthzGateLocalClient, ConfigAuthorizationController,
    DefaultAuthorizationController, DomainError,
};
pub use module::AuthzGate;
