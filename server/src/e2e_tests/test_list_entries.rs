//! Test the seeded catalog listing.

use axum::http::StatusCode;

use crate::catalog::Catalog;
use crate::e2e_tests::helpers::*;

#[test]
fn test_new_service_lists_three_seed_entries() {
    let app = TestApp::new();

    let response = app.send(get("/anime"));

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        serde_json::json!([
            {"id": 1, "title": "Attack on Titan", "genre": "Экшен", "year": 2013, "rating": 9.1},
            {"id": 2, "title": "Death Note", "genre": "Детектив", "year": 2006, "rating": 9.0},
            {"id": 3, "title": "Naruto", "genre": "Сёнен", "year": 2002, "rating": 8.5},
        ])
    );
}

#[test]
fn test_listing_needs_no_token() {
    let app = TestApp::new();
    assert_eq!(app.send(get("/anime")).status, StatusCode::OK);
}

#[test]
fn test_empty_catalog_lists_nothing() {
    let app = TestApp::with_catalog(Catalog::new());

    let response = app.send(get("/anime"));

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!([]));
}

#[test]
fn test_independent_apps_do_not_share_entries() {
    let first = TestApp::new();
    let second = TestApp::new();
    let token = first.token_for("alice");

    let response = first.send(post_anime(Some(&token), &new_entry("Frieren")));
    assert_eq!(response.status, StatusCode::CREATED);

    assert_eq!(listed_ids(&first), vec![1, 2, 3, 4]);
    assert_eq!(listed_ids(&second), vec![1, 2, 3]);
}
