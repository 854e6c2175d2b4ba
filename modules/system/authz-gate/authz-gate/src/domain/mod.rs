//! Domain layer for the `AuthZ` gate.

pub mod controllers;
pub mod error;
pub mod gate;
pub mod local_client;

pub use controllers::{ConfigAuthorizationController, DefaultAuthorizationController};
pub use error::DomainError;
pub use gate::{AuthorizationGate, ControllerRegistration};
pub use local_client::AuthzGateLocalClient;
