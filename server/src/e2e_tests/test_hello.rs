//! Test the authenticated greeting.

use axum::http::{Method, StatusCode, header};

use crate::e2e_tests::helpers::*;

#[test]
fn test_hello_greets_token_subject() {
    let app = TestApp::new();
    let token = app.token_for("alice");

    let response = app.send(request(Method::GET, "/hello", Some(&token), None));

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "Привет, alice");
}

#[test]
fn test_hello_without_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app.send(get("/hello"));

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers
            .get(header::WWW_AUTHENTICATE)
            .map(|value| value.as_bytes()),
        Some(&b"Bearer"[..])
    );
}
