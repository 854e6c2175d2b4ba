use std::borrow::Cow;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Credential-type tag, e.g. `token` or `username-password`.
///
/// Mechanisms advertise the kinds they understand and the dispatcher only
/// offers them credentials of those kinds.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialKind(Cow<'static, str>);

impl CredentialKind {
    /// Opaque bearer or API token.
    pub const TOKEN: Self = Self(Cow::Borrowed("token"));
    /// Username and password pair.
    pub const USERNAME_PASSWORD: Self = Self(Cow::Borrowed("username-password"));
    /// Client certificate presented during the TLS handshake.
    pub const CERTIFICATE: Self = Self(Cow::Borrowed("certificate"));

    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self(Cow::Owned(kind.into()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How credential material reaches the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialTransport {
    /// `Authorization` header with the given auth scheme (`Bearer`, `Basic`, ...).
    AuthorizationHeader { scheme: String },
    /// Arbitrary request header.
    Header { name: String },
    /// Named cookie.
    Cookie { name: String },
    /// Form post fields.
    Form,
    /// TLS client certificate.
    TlsClientCertificate,
}

impl CredentialTransport {
    #[must_use]
    pub fn bearer() -> Self {
        Self::AuthorizationHeader {
            scheme: "Bearer".to_owned(),
        }
    }

    #[must_use]
    pub fn basic() -> Self {
        Self::AuthorizationHeader {
            scheme: "Basic".to_owned(),
        }
    }

    /// Whether credentials delivered over `other` arrive through this transport.
    ///
    /// Header names, cookie names and auth schemes compare case-insensitively.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::AuthorizationHeader { scheme: a },
                Self::AuthorizationHeader { scheme: b },
            ) => a.eq_ignore_ascii_case(b),
            (Self::Header { name: a }, Self::Header { name: b }) => a.eq_ignore_ascii_case(b),
            (Self::Cookie { name: a }, Self::Cookie { name: b }) => a == b,
            (Self::Form, Self::Form) | (Self::TlsClientCertificate, Self::TlsClientCertificate) => {
                true
            }
            _ => false,
        }
    }
}

impl fmt::Display for CredentialTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthorizationHeader { scheme } => write!(f, "authorization:{scheme}"),
            Self::Header { name } => write!(f, "header:{name}"),
            Self::Cookie { name } => write!(f, "cookie:{name}"),
            Self::Form => f.write_str("form"),
            Self::TlsClientCertificate => f.write_str("tls-client-certificate"),
        }
    }
}

/// Opaque credential material extracted from a request.
///
/// The secret is redacted by `Debug` and never serialized.
#[derive(Debug, Clone)]
pub struct Credential {
    kind: CredentialKind,
    transport: CredentialTransport,
    secret: SecretString,
}

impl Credential {
    #[must_use]
    pub fn new(
        kind: CredentialKind,
        transport: CredentialTransport,
        secret: impl Into<SecretString>,
    ) -> Self {
        Self {
            kind,
            transport,
            secret: secret.into(),
        }
    }

    /// Bearer token taken from the `Authorization` header.
    #[must_use]
    pub fn bearer(token: impl Into<SecretString>) -> Self {
        Self::new(CredentialKind::TOKEN, CredentialTransport::bearer(), token)
    }

    #[must_use]
    pub fn kind(&self) -> &CredentialKind {
        &self.kind
    }

    #[must_use]
    pub fn transport(&self) -> &CredentialTransport {
        &self.transport
    }

    #[must_use]
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.transport == other.transport
            && self.secret.expose_secret() == other.secret.expose_secret()
    }
}

impl Eq for Credential {}
