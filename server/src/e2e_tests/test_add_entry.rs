//! Test adding entries with a valid token.

use axum::http::{StatusCode, header};

use crate::catalog::Catalog;
use crate::e2e_tests::helpers::*;

#[test]
fn test_add_assigns_next_id() {
    let app = TestApp::new();
    let token = app.token_for("alice");

    let response = app.send(post_anime(Some(&token), &new_entry("Frieren")));

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["id"], 4);
    assert_eq!(
        response
            .headers
            .get(header::LOCATION)
            .map(|value| value.as_bytes()),
        Some(&b"/anime/4"[..])
    );
}

#[test]
fn test_add_then_get_returns_input_with_id() {
    let app = TestApp::new();
    let token = app.token_for("alice");

    let created = app.send(post_anime(Some(&token), &new_entry("Frieren")));
    let id = created.body["id"].as_u64().expect("numeric id");

    let fetched = app.send(get(&format!("/anime/{id}")));

    let mut expected = new_entry("Frieren");
    expected["id"] = serde_json::json!(id);
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, expected);
}

#[test]
fn test_add_ignores_caller_supplied_id() {
    let app = TestApp::new();
    let token = app.token_for("alice");

    let mut body = new_entry("Frieren");
    body["id"] = serde_json::json!(1);
    let response = app.send(post_anime(Some(&token), &body));

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["id"], 4);
    assert_eq!(app.send(get("/anime/1")).body["title"], "Attack on Titan");
}

#[test]
fn test_add_ignores_negative_or_oversized_id() {
    let app = TestApp::new();
    let token = app.token_for("alice");

    let cases = [
        (serde_json::json!(-5), 4),
        (serde_json::json!(4_294_967_296_i64), 5),
    ];
    for (supplied, expected) in cases {
        let mut body = new_entry("Frieren");
        body["id"] = supplied;
        let response = app.send(post_anime(Some(&token), &body));

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["id"], expected);
    }
    assert_eq!(listed_ids(&app), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_add_to_empty_catalog_starts_at_one() {
    let app = TestApp::with_catalog(Catalog::new());
    let token = app.token_for("alice");

    let response = app.send(post_anime(Some(&token), &new_entry("Frieren")));

    assert_eq!(response.body["id"], 1);
}

#[test]
fn test_add_preserves_insertion_order() {
    let app = TestApp::new();
    let token = app.token_for("alice");

    for title in ["Frieren", "Mushishi", "Monster"] {
        let response = app.send(post_anime(Some(&token), &new_entry(title)));
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let listing = app.send(get("/anime"));
    let titles: Vec<&str> = listing
        .body
        .as_array()
        .expect("array body")
        .iter()
        .map(|entry| entry["title"].as_str().expect("title"))
        .collect();
    assert_eq!(
        titles,
        vec![
            "Attack on Titan",
            "Death Note",
            "Naruto",
            "Frieren",
            "Mushishi",
            "Monster"
        ]
    );
}

#[test]
fn test_add_with_invalid_body_and_valid_token() {
    let app = TestApp::new();
    let token = app.token_for("alice");

    let response = app.send(post_anime(
        Some(&token),
        &serde_json::json!({"title": "No year or rating"}),
    ));

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(listed_ids(&app), vec![1, 2, 3]);
}
