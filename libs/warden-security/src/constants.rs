//! Well-known identity constants.

/// Principal name carried by anonymous identities.
pub const ANONYMOUS_PRINCIPAL: &str = "";

/// Attribute set on identities that entered through a security-context override.
pub const OVERRIDE_ATTRIBUTE: &str = "warden.security_context_override";

/// Principal used by development mechanisms when none is configured.
pub const DEFAULT_PRINCIPAL: &str = "dev-user";
