//! HTTP error responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::auth::AuthError;
use crate::catalog::CatalogError;

/// An error surfaced to an HTTP client.
#[derive(Debug)]
pub enum ApiError {
    /// 404 with the given message.
    NotFound(String),
    /// 401 with the given message.
    Unauthenticated(String),
    /// 500 with the given message.
    Internal(String),
    /// The request body could not be decoded; keeps the extractor's status.
    InvalidBody(JsonRejection),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidBody(rejection) => (rejection.status(), rejection.body_text()),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Unauthenticated(message) => (StatusCode::UNAUTHORIZED, message),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        let mut response = (status, Json(ErrorResponse { message })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(_) => Self::NotFound(e.to_string()),
            CatalogError::Unauthenticated(_) => Self::Unauthenticated(e.to_string()),
            CatalogError::IdSpaceExhausted => Self::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Signing(_) => Self::Internal(e.to_string()),
            _ => Self::Unauthenticated(format!("not authenticated: {e}")),
        }
    }
}
