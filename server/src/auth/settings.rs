//! JWT signing settings.
//!
//! # Pre-conditions
//! - The secret, issuer and audience must be non-empty.
//! - The token lifetime must be at least one second.
//!
//! # Post-conditions
//! - `JwtSettings` instances are immutable once created.
//!
//! # Invariants
//! - A constructed `JwtSettings` always satisfies the pre-conditions above,
//!   so issuing a token can never fail for configuration reasons.

use std::time::Duration;

/// Error returned when JWT settings are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JwtSettingsError {
    /// The HS256 secret is empty.
    EmptySecret,
    /// The issuer is empty.
    EmptyIssuer,
    /// The audience is empty.
    EmptyAudience,
    /// The token lifetime is shorter than one second.
    ZeroLifetime,
}

impl std::fmt::Display for JwtSettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySecret => write!(f, "HS256 secret must not be empty"),
            Self::EmptyIssuer => write!(f, "issuer must not be empty"),
            Self::EmptyAudience => write!(f, "audience must not be empty"),
            Self::ZeroLifetime => write!(f, "token lifetime must be at least one second"),
        }
    }
}

impl std::error::Error for JwtSettingsError {}

/// Settings shared by token issuance and verification.
///
/// Tokens are signed with HMAC-SHA256 using `secret` as raw key bytes.
#[derive(Clone)]
pub struct JwtSettings {
    secret: Vec<u8>,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl JwtSettings {
    /// Create validated JWT settings.
    ///
    /// # Errors
    /// Returns the first violated pre-condition as a `JwtSettingsError`.
    pub fn new(
        secret: Vec<u8>,
        issuer: String,
        audience: String,
        lifetime: Duration,
    ) -> Result<Self, JwtSettingsError> {
        if secret.is_empty() {
            return Err(JwtSettingsError::EmptySecret);
        }
        if issuer.is_empty() {
            return Err(JwtSettingsError::EmptyIssuer);
        }
        if audience.is_empty() {
            return Err(JwtSettingsError::EmptyAudience);
        }
        if lifetime.as_secs() == 0 {
            return Err(JwtSettingsError::ZeroLifetime);
        }

        Ok(Self {
            secret,
            issuer,
            audience,
            lifetime,
        })
    }

    #[must_use]
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    #[must_use]
    pub fn audience(&self) -> &str {
        &self.audience
    }

    #[must_use]
    pub const fn lifetime(&self) -> Duration {
        self.lifetime
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}
