// Life of a request:
// 1. axum routes the request and extracts the path, query, body and bearer token
// 2. Reads (list / get) go straight to the catalog
// 3. Mutations (add / remove) first verify the bearer token:
//     - signature, issuer and audience via jsonwebtoken
//     - expiry against the injected time source
//    then take the catalog write lock
// 4. Catalog errors map to HTTP responses in `api::error`
//
// System components:
//  - Token issuer / verifier (auth)
//  - In-memory catalog behind a single-writer lock (catalog)
//  - HTTP surface (api)

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod time;

mod e2e_tests;

pub use api::{AppState, router};
pub use catalog::{Catalog, CatalogEntry, CatalogError, CatalogService};
