#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod constants;
pub mod credential;
pub mod identity;

pub use credential::{Credential, CredentialKind, CredentialTransport};
pub use identity::{IdentityRecord, IdentityRecordBuilder};
