//! Test token issuance.

use axum::http::{Method, StatusCode};

use crate::auth::TokenVerifier;
use crate::e2e_tests::helpers::*;

#[test]
fn test_token_has_three_segments() {
    let app = TestApp::new();

    let token = app.token_for("alice");

    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn test_token_requires_username() {
    let app = TestApp::new();

    let response = app.send(request(Method::POST, "/token", None, None));

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[test]
fn test_token_accepts_empty_username() {
    let app = TestApp::new();

    let token = app.token_for("");
    let response = app.send(request(Method::GET, "/hello", Some(&token), None));

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "Привет, ");
}

#[test]
fn test_issued_token_verifies_with_same_settings() {
    let app = TestApp::new();
    let token = app.token_for("bob");

    let settings = crate::auth::JwtSettings::new(
        SECRET.to_vec(),
        ISSUER.to_string(),
        AUDIENCE.to_string(),
        std::time::Duration::from_secs(LIFETIME_SECS),
    )
    .expect("valid settings");
    let verifier = crate::auth::JwtAuthority::new(settings, app.time.clone());

    let identity = verifier.verify(&token).expect("token verifies");
    assert_eq!(identity.subject(), "bob");
}
