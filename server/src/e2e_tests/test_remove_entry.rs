//! Test removing entries with a valid token.

use axum::http::StatusCode;

use crate::e2e_tests::helpers::*;

#[test]
fn test_remove_existing_entry() {
    let app = TestApp::new();
    let token = app.token_for("alice");

    let response = app.send(delete_anime(2, Some(&token)));

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(response.body, serde_json::Value::Null);
    assert_eq!(app.send(get("/anime/2")).status, StatusCode::NOT_FOUND);
    assert_eq!(listed_ids(&app), vec![1, 3]);
}

#[test]
fn test_remove_missing_entry_is_not_found() {
    let app = TestApp::new();
    let token = app.token_for("alice");

    let response = app.send(delete_anime(42, Some(&token)));

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "anime with id=42 not found");
}

#[test]
fn test_remove_twice_is_not_found() {
    let app = TestApp::new();
    let token = app.token_for("alice");

    assert_eq!(
        app.send(delete_anime(1, Some(&token))).status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.send(delete_anime(1, Some(&token))).status,
        StatusCode::NOT_FOUND
    );
}

#[test]
fn test_remove_out_of_range_id_is_not_found() {
    let app = TestApp::new();
    let token = app.token_for("alice");

    for id in [-1, 0, 4_294_967_296] {
        let response = app.send(delete_anime(id, Some(&token)));

        assert_eq!(response.status, StatusCode::NOT_FOUND, "id {id}");
        assert_eq!(
            response.body["message"],
            format!("anime with id={id} not found")
        );
    }
    assert_eq!(listed_ids(&app), vec![1, 2, 3]);
}
