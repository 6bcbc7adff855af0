//! Request handlers.
//!
//! Each handler is a thin adapter: extract, call the catalog service or the
//! token issuer, map the result to a response.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use super::error::ApiError;
use crate::auth::BearerToken;
use crate::catalog::{CatalogEntry, EntryId};

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /token?username=<name>
///
/// Identity by assertion: whoever asks gets a token for the name they give.
pub async fn issue_token(
    State(state): State<AppState>,
    Query(request): Query<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let credential = state.issuer.issue_token(&request.username)?;
    tracing::debug!(
        username = %request.username,
        expires_at = credential.expires_at(),
        "issued token"
    );
    Ok(Json(TokenResponse {
        token: credential.token().to_string(),
    }))
}

/// GET /hello
pub async fn hello(
    State(state): State<AppState>,
    bearer: BearerToken,
) -> Result<Json<String>, ApiError> {
    let identity = state.catalog.authenticate(bearer.as_deref())?;
    Ok(Json(format!("Привет, {}", identity.subject())))
}

/// GET /anime
pub async fn list_anime(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    Json(state.catalog.list())
}

/// GET /anime/{id}
pub async fn get_anime(
    State(state): State<AppState>,
    Path(raw_id): Path<i64>,
) -> Result<Json<CatalogEntry>, ApiError> {
    let id = entry_id(raw_id)?;
    Ok(Json(state.catalog.get(id)?))
}

/// POST /anime
///
/// A missing or rejected credential is reported before any problem with the
/// request body.
pub async fn add_anime(
    State(state): State<AppState>,
    bearer: BearerToken,
    payload: Result<Json<CatalogEntry>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = match payload {
        Ok(Json(entry)) => entry,
        Err(rejection) => {
            state.catalog.authenticate(bearer.as_deref())?;
            return Err(ApiError::InvalidBody(rejection));
        }
    };
    let stored = state.catalog.add(bearer.as_deref(), entry)?;
    let location = format!("/anime/{}", stored.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(stored)))
}

/// DELETE /anime/{id}
pub async fn remove_anime(
    State(state): State<AppState>,
    bearer: BearerToken,
    Path(raw_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = match entry_id(raw_id) {
        Ok(id) => id,
        Err(not_found) => {
            state.catalog.authenticate(bearer.as_deref())?;
            return Err(not_found);
        }
    };
    state.catalog.remove(bearer.as_deref(), id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Narrow a path id. An integer outside the id range names no entry.
fn entry_id(raw_id: i64) -> Result<EntryId, ApiError> {
    EntryId::try_from(raw_id)
        .map_err(|_| ApiError::NotFound(format!("anime with id={raw_id} not found")))
}
