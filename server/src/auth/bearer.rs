//! Bearer token extraction from the `Authorization` header.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header::AUTHORIZATION, request::Parts};

const BEARER_PREFIX: &str = "Bearer ";

/// The bearer token presented with a request, if any.
///
/// Extraction never fails: a missing header, a non-UTF-8 value or a
/// different scheme all produce `BearerToken(None)`, leaving the decision to
/// the gated operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Read the token out of `Authorization: Bearer <token>`.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_bearer)
            .map(str::to_string);
        Self(token)
    }
}

/// Strip the `Bearer` scheme. The scheme name is case-insensitive.
fn parse_bearer(value: &str) -> Option<&str> {
    let value = value.trim();
    let (scheme, token) = value.split_at_checked(BEARER_PREFIX.len())?;
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(value).expect("valid header value"),
        );
        headers
    }

    #[test]
    fn test_parse_bearer_token() {
        let token = BearerToken::from_headers(&headers_with("Bearer abc.def.ghi"));
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let token = BearerToken::from_headers(&headers_with("bearer abc.def.ghi"));
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header() {
        let token = BearerToken::from_headers(&HeaderMap::new());
        assert_eq!(token, BearerToken(None));
    }

    #[test]
    fn test_other_scheme_is_ignored() {
        let token = BearerToken::from_headers(&headers_with("Basic dXNlcjpwYXNz"));
        assert_eq!(token, BearerToken(None));
    }

    #[test]
    fn test_empty_token_is_ignored() {
        assert_eq!(
            BearerToken::from_headers(&headers_with("Bearer    ")),
            BearerToken(None)
        );
        assert_eq!(
            BearerToken::from_headers(&headers_with("Bearer")),
            BearerToken(None)
        );
    }
}
