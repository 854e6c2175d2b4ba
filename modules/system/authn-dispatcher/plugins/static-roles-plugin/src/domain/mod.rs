pub mod augmentor;
pub mod service;

pub use service::Service;
