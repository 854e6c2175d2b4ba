//! `AuthZ` Gate SDK
//!
//! This crate provides the public contracts of the `authz_gate` module:
//!
//! - [`AuthzGateClient`] - Public API trait for hosts
//! - [`AuthorizationController`] - Overridable decision whether enforcement is active
//! - [`RequestContext`] - Transport-neutral description of the request
//! - [`Admission`] - Outcome of a role check
//! - [`AuthzGateError`] - Error types
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod controller;
pub mod error;
pub mod models;

pub use api::AuthzGateClient;
pub use controller::AuthorizationController;
pub use error::AuthzGateError;
pub use models::{Admission, RequestContext};
