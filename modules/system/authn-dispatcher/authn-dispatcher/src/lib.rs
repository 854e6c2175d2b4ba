//! `AuthN` Dispatcher Module
//!
//! This module selects among the registered authentication mechanisms for
//! every request, then runs the registered identity augmentors over the
//! authenticated identity in ascending priority order.
//!
//! Provides the `AuthnDispatcherClient` trait implementation hosts call per
//! request.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use config::AuthnDispatcherConfig;
pub use domain::{
    AugmentationPipeline, AugmentorRegistry, AuthenticationDispatcher, AuthnDispatcherLocalClient,
    DomainError, MechanismRegistry, Service,
};
pub use module::AuthnDispatcher;
