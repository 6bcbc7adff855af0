//! Authentication module.
//!
//! Issues and verifies the bearer credentials that gate catalog mutations.
//! The catalog only depends on the [`TokenVerifier`] capability; the token
//! endpoint only depends on [`TokenIssuer`]. [`JwtAuthority`] implements
//! both with HS256-signed JWTs.
//!
//! # Invariants
//! - Verification is stateless: nothing about issued tokens is stored.
//! - A credential moves from valid to invalid only by passing its expiry.

pub mod bearer;
pub mod jwt;
pub mod settings;

pub use bearer::BearerToken;
pub use jwt::JwtAuthority;
pub use settings::{JwtSettings, JwtSettingsError};

/// The identity asserted by a verified credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    subject: String,
}

impl Identity {
    /// Wrap a subject that a verifier has accepted.
    #[must_use]
    pub const fn new(subject: String) -> Self {
        Self { subject }
    }

    /// The `sub` claim of the verified credential.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

/// A freshly issued credential.
#[derive(Debug, Clone)]
pub struct Credential {
    token: String,
    expires_at: u64,
}

impl Credential {
    #[must_use]
    pub const fn new(token: String, expires_at: u64) -> Self {
        Self { token, expires_at }
    }

    /// The encoded token, to be presented as `Authorization: Bearer <token>`.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Expiry in seconds since Unix epoch.
    #[must_use]
    pub const fn expires_at(&self) -> u64 {
        self.expires_at
    }
}

/// Error returned when a credential cannot be issued or is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No credential was presented.
    MissingToken,
    /// The credential is malformed or cannot be parsed.
    MalformedToken,
    /// The credential signature does not match the configured key.
    InvalidSignature,
    /// The `iss` claim does not match the configured issuer.
    InvalidIssuer,
    /// The `aud` claim does not match the configured audience.
    InvalidAudience,
    /// The credential is past its expiry.
    TokenExpired,
    /// A required claim is absent.
    MissingClaim(String),
    /// Signing a new credential failed.
    Signing(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingToken => write!(f, "missing bearer token"),
            Self::MalformedToken => write!(f, "malformed JWT"),
            Self::InvalidSignature => write!(f, "invalid JWT signature"),
            Self::InvalidIssuer => write!(f, "invalid JWT issuer"),
            Self::InvalidAudience => write!(f, "invalid JWT audience"),
            Self::TokenExpired => write!(f, "JWT has expired"),
            Self::MissingClaim(claim) => write!(f, "missing '{claim}' claim in JWT"),
            Self::Signing(reason) => write!(f, "failed to sign JWT: {reason}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Capability to mint credentials for an asserted identity.
pub trait TokenIssuer: Send + Sync {
    /// Issue a credential whose subject is `username`.
    ///
    /// The username is embedded as-is; no validation is performed.
    fn issue_token(&self, username: &str) -> Result<Credential, AuthError>;
}

/// Capability to check presented credentials.
pub trait TokenVerifier: Send + Sync {
    /// Verify signature, issuer, audience and expiry of `token`.
    fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(AuthError::MissingToken.to_string(), "missing bearer token");
        assert_eq!(AuthError::MalformedToken.to_string(), "malformed JWT");
        assert_eq!(
            AuthError::InvalidSignature.to_string(),
            "invalid JWT signature"
        );
        assert_eq!(AuthError::InvalidIssuer.to_string(), "invalid JWT issuer");
        assert_eq!(
            AuthError::InvalidAudience.to_string(),
            "invalid JWT audience"
        );
        assert_eq!(AuthError::TokenExpired.to_string(), "JWT has expired");
        assert_eq!(
            AuthError::MissingClaim("sub".to_string()).to_string(),
            "missing 'sub' claim in JWT"
        );
        assert_eq!(
            AuthError::Signing("boom".to_string()).to_string(),
            "failed to sign JWT: boom"
        );
    }

    #[test]
    fn test_identity_subject() {
        let identity = Identity::new("alice".to_string());
        assert_eq!(identity.subject(), "alice");
    }
}
