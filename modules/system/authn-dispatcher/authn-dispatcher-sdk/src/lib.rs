//! `AuthN` Dispatcher SDK
//!
//! This crate provides the public contracts of the `authn_dispatcher` module:
//!
//! - [`AuthnDispatcherClient`] - Public API trait for hosts
//! - [`AuthenticationMechanism`] - Plugin trait for authentication mechanisms
//! - [`DelegatingMechanism`] - Wraps a mechanism and overrides selected operations
//! - [`IdentityAugmentor`] - Plugin trait for identity augmentors
//! - [`Challenge`] - Transport-neutral authentication challenge
//! - [`AuthnDispatcherError`] - Error types
//!
//! ## Usage
//!
//! Hosts extract credential material from the inbound request and hand it to
//! the client:
//!
//! ```ignore
//! use authn_dispatcher_sdk::{AuthnDispatcherClient, RequestCredentials};
//! use warden_security::Credential;
//!
//! let request = RequestCredentials::new().with_credential(Credential::bearer(token));
//! match authn.authenticate_and_augment(request).await {
//!     Ok(identity) => { /* continue with identity */ }
//!     Err(err) => { /* respond with err.status_code() and err.challenge() */ }
//! }
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod augmentor;
pub mod delegate;
pub mod error;
pub mod mechanism;
pub mod models;
pub mod security_override;

// Re-export main types at crate root
pub use api::AuthnDispatcherClient;
pub use augmentor::{AugmentationContext, FnAugmentor, IdentityAugmentor};
pub use delegate::{AuthenticateOverride, DelegatingMechanism};
pub use error::{AugmentorError, AuthnDispatcherError, MechanismError};
pub use mechanism::AuthenticationMechanism;
pub use models::{AuthenticationOutcome, Challenge, RequestCredentials, RequestIdentitySource};
pub use security_override::SecurityContextOverride;
