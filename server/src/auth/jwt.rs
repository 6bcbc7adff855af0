//! HS256 JWT issuance and verification.
//!
//! # Pre-conditions
//! - `JwtSettings` has already been validated (non-empty secret, issuer and
//!   audience, non-zero lifetime).
//!
//! # Post-conditions
//! - Issued tokens carry `sub`, `iss`, `aud`, `iat` and `exp` claims.
//! - Verification succeeds only when the signature, issuer and audience match
//!   and the current time is strictly before `exp`.
//!
//! # Invariants
//! - Verification is stateless and does not modify any external state.
//! - Expiry is judged against the injected [`TimeSource`] with zero leeway.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::{AuthError, Credential, Identity, JwtSettings, TokenIssuer, TokenVerifier};
use crate::time::TimeSource;

/// Claims carried by every issued JWT.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject claim containing the asserted username.
    sub: String,
    iss: String,
    aud: String,
    /// Issued-at, seconds since Unix epoch.
    iat: u64,
    /// Expiry, seconds since Unix epoch.
    exp: u64,
}

/// Issues and verifies HS256 JWTs from one set of [`JwtSettings`].
pub struct JwtAuthority {
    settings: JwtSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    time: Arc<dyn TimeSource>,
}

impl JwtAuthority {
    /// Build an authority that reads the clock from `time`.
    #[must_use]
    pub fn new(settings: JwtSettings, time: Arc<dyn TimeSource>) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.secret());
        let decoding_key = DecodingKey::from_secret(settings.secret());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[settings.issuer()]);
        validation.set_audience(&[settings.audience()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        // Expiry is checked against `time` below, not the library's own clock.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            settings,
            encoding_key,
            decoding_key,
            validation,
            time,
        }
    }
}

impl TokenIssuer for JwtAuthority {
    fn issue_token(&self, username: &str) -> Result<Credential, AuthError> {
        let now = self.time.now_secs();
        let expires_at = now.saturating_add(self.settings.lifetime().as_secs());
        let claims = Claims {
            sub: username.to_string(),
            iss: self.settings.issuer().to_string(),
            aud: self.settings.audience().to_string(),
            iat: now,
            exp: expires_at,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(Credential::new(token, expires_at))
    }
}

impl TokenVerifier for JwtAuthority {
    fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(map_jwt_error)?;

        if self.time.now_secs() >= token_data.claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(Identity::new(token_data.claims.sub))
    }
}

/// Maps jsonwebtoken errors to our `AuthError` type.
fn map_jwt_error(error: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
        ErrorKind::InvalidAudience => AuthError::InvalidAudience,
        ErrorKind::MissingRequiredClaim(claim) => AuthError::MissingClaim(claim.clone()),
        _ => AuthError::MalformedToken,
    }
}
