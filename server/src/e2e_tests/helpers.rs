//! Common helpers for end-to-end tests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use crate::api::{AppState, router};
use crate::auth::{JwtAuthority, JwtSettings};
use crate::catalog::{Catalog, CatalogService};
use crate::time::ManualTimeSource;

pub const SECRET: &[u8] = b"e2e-test-secret-key-that-is-long-enough";
pub const ISSUER: &str = "anime-catalog";
pub const AUDIENCE: &str = "anime-catalog-clients";
pub const LIFETIME_SECS: u64 = 30 * 60;

/// A response with its body decoded.
///
/// JSON bodies are parsed; anything else becomes a JSON string, and an
/// empty body becomes `Value::Null`.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// A router over a freshly seeded catalog, plus the clock that drives token expiry.
pub struct TestApp {
    router: Router,
    runtime: tokio::runtime::Runtime,
    pub time: Arc<ManualTimeSource>,
}

impl TestApp {
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(Catalog::seeded())
    }

    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self::with_audience(catalog, AUDIENCE)
    }

    /// Build an app whose tokens are issued and checked for `audience`.
    #[must_use]
    pub fn with_audience(catalog: Catalog, audience: &str) -> Self {
        let time = Arc::new(ManualTimeSource::default_start());

        #[allow(clippy::expect_used)]
        let settings = JwtSettings::new(
            SECRET.to_vec(),
            ISSUER.to_string(),
            audience.to_string(),
            Duration::from_secs(LIFETIME_SECS),
        )
        .expect("valid test settings");
        let authority = Arc::new(JwtAuthority::new(settings, time.clone()));
        let state = AppState::new(CatalogService::new(catalog, authority.clone()), authority);

        #[allow(clippy::expect_used)]
        let runtime = tokio::runtime::Runtime::new().expect("Failed to create runtime");

        Self {
            router: router(state),
            runtime,
            time,
        }
    }

    /// Send a request through the router and decode the response.
    pub fn send(&self, request: Request<Body>) -> TestResponse {
        self.runtime.block_on(async {
            #[allow(clippy::expect_used)]
            let response = self
                .router
                .clone()
                .oneshot(request)
                .await
                .expect("router is infallible");

            let status = response.status();
            let headers = response.headers().clone();

            #[allow(clippy::expect_used)]
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("readable body");

            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes)
                    .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
            };

            TestResponse {
                status,
                headers,
                body,
            }
        })
    }

    /// Request a token for `username` over HTTP.
    pub fn token_for(&self, username: &str) -> String {
        let response = self.send(request(
            Method::POST,
            &format!("/token?username={username}"),
            None,
            None,
        ));
        assert_eq!(response.status, StatusCode::OK, "token request failed");

        #[allow(clippy::expect_used)]
        let token = response.body["token"]
            .as_str()
            .expect("token field")
            .to_string();
        token
    }
}

/// Build a request with an optional bearer token and JSON body.
pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    #[allow(clippy::expect_used)]
    builder.body(body).expect("valid request")
}

pub fn get(uri: &str) -> Request<Body> {
    request(Method::GET, uri, None, None)
}

pub fn post_anime(token: Option<&str>, body: &Value) -> Request<Body> {
    request(Method::POST, "/anime", token, Some(body))
}

pub fn delete_anime(id: i64, token: Option<&str>) -> Request<Body> {
    request(Method::DELETE, &format!("/anime/{id}"), token, None)
}

/// A new-entry body without an id.
pub fn new_entry(title: &str) -> Value {
    serde_json::json!({
        "title": title,
        "genre": "Фэнтези",
        "year": 2023,
        "rating": 9.3,
    })
}

/// Ids of the listed entries, in listing order.
pub fn listed_ids(app: &TestApp) -> Vec<u64> {
    let response = app.send(get("/anime"));
    assert_eq!(response.status, StatusCode::OK);

    #[allow(clippy::expect_used)]
    let ids = response
        .body
        .as_array()
        .expect("array body")
        .iter()
        .map(|entry| entry["id"].as_u64().expect("numeric id"))
        .collect();
    ids
}
