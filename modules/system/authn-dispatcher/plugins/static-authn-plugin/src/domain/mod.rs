pub mod mechanism;
pub mod service;

pub use service::Service;
