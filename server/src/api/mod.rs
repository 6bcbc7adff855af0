//! HTTP surface of the catalog.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::auth::TokenIssuer;
use crate::catalog::CatalogService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The gated catalog. Owns the entry collection.
    pub catalog: Arc<CatalogService>,
    /// Mints tokens for `/token`.
    pub issuer: Arc<dyn TokenIssuer>,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: CatalogService, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            issuer,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/token", post(handlers::issue_token))
        .route("/hello", get(handlers::hello))
        .route(
            "/anime",
            get(handlers::list_anime).post(handlers::add_anime),
        )
        .route(
            "/anime/{id}",
            get(handlers::get_anime).delete(handlers::remove_anime),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
