//! Domain layer for the `AuthN` dispatcher.

pub mod dispatcher;
pub mod error;
pub mod local_client;
pub mod pipeline;
pub mod registry;
pub mod service;

pub use dispatcher::AuthenticationDispatcher;
pub use error::DomainError;
pub use local_client::AuthnDispatcherLocalClient;
pub use pipeline::AugmentationPipeline;
pub use registry::{AugmentorRegistry, MechanismRegistry, PriorityRegistry, Registration};
pub use service::Service;
