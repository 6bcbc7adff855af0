//! Test that gated operations reject missing, malformed, expired and foreign tokens.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};

use crate::catalog::Catalog;
use crate::e2e_tests::helpers::*;

#[test]
fn test_add_without_token() {
    let app = TestApp::new();

    let response = app.send(post_anime(None, &new_entry("Frieren")));

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body["message"],
        "not authenticated: missing bearer token"
    );
    assert_eq!(listed_ids(&app), vec![1, 2, 3]);
}

#[test]
fn test_add_with_malformed_token() {
    let app = TestApp::new();

    let response = app.send(post_anime(Some("not-a-jwt"), &new_entry("Frieren")));

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "not authenticated: malformed JWT");
}

#[test]
fn test_add_with_expired_token() {
    let app = TestApp::new();
    let token = app.token_for("alice");
    app.time.advance(LIFETIME_SECS);

    let response = app.send(post_anime(Some(&token), &new_entry("Frieren")));

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "not authenticated: JWT has expired");
    assert_eq!(listed_ids(&app), vec![1, 2, 3]);
}

#[test]
fn test_token_valid_until_expiry() {
    let app = TestApp::new();
    let token = app.token_for("alice");
    app.time.advance(LIFETIME_SECS - 1);

    let response = app.send(post_anime(Some(&token), &new_entry("Frieren")));

    assert_eq!(response.status, StatusCode::CREATED);
}

#[test]
fn test_fresh_token_works_after_old_one_expires() {
    let app = TestApp::new();
    let old = app.token_for("alice");
    app.time.advance(LIFETIME_SECS * 2);
    let fresh = app.token_for("alice");

    assert_eq!(
        app.send(delete_anime(1, Some(&old))).status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.send(delete_anime(1, Some(&fresh))).status,
        StatusCode::NO_CONTENT
    );
}

#[test]
fn test_token_for_other_audience_is_rejected() {
    let app = TestApp::new();
    let foreign = TestApp::with_audience(Catalog::seeded(), "some-other-service");
    let token = foreign.token_for("alice");

    let response = app.send(post_anime(Some(&token), &new_entry("Frieren")));

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body["message"],
        "not authenticated: invalid JWT audience"
    );
}

#[test]
fn test_remove_without_token_keeps_entry() {
    let app = TestApp::new();

    let response = app.send(delete_anime(1, None));

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.send(get("/anime/1")).status, StatusCode::OK);
}

#[test]
fn test_remove_missing_without_token_is_unauthorized_not_not_found() {
    let app = TestApp::new();

    let response = app.send(delete_anime(99, None));

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[test]
fn test_remove_out_of_range_id_without_token_is_unauthorized() {
    let app = TestApp::new();

    for id in [-1, 4_294_967_296] {
        let response = app.send(delete_anime(id, None));

        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "id {id}");
    }
}

#[test]
fn test_remove_with_expired_token() {
    let app = TestApp::new();
    let token = app.token_for("alice");
    app.time.advance(LIFETIME_SECS + 60);

    let response = app.send(delete_anime(1, Some(&token)));

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(listed_ids(&app), vec![1, 2, 3]);
}

#[test]
fn test_non_bearer_scheme_is_rejected() {
    let app = TestApp::new();
    let token = app.token_for("alice");

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/anime/1")
        .header(header::AUTHORIZATION, format!("Basic {token}"))
        .body(Body::empty())
        .expect("valid request");
    let response = app.send(request);

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[test]
fn test_invalid_body_without_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app.send(post_anime(None, &serde_json::json!({"title": 5})));

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
