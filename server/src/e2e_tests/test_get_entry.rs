//! Test fetching single entries.

use axum::http::StatusCode;

use crate::e2e_tests::helpers::*;

#[test]
fn test_get_existing_entry() {
    let app = TestApp::new();

    let response = app.send(get("/anime/2"));

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], 2);
    assert_eq!(response.body["title"], "Death Note");
}

#[test]
fn test_get_missing_entry_is_not_found() {
    let app = TestApp::new();

    for id in [-1, 0, 4, 99, i64::from(i32::MAX), 4_294_967_296] {
        let response = app.send(get(&format!("/anime/{id}")));

        assert_eq!(response.status, StatusCode::NOT_FOUND, "id {id}");
        assert_eq!(
            response.body["message"],
            format!("anime with id={id} not found")
        );
    }
}

#[test]
fn test_get_beyond_i64_is_rejected() {
    let app = TestApp::new();

    let response = app.send(get("/anime/99999999999999999999"));

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[test]
fn test_get_non_numeric_id_is_rejected() {
    let app = TestApp::new();

    let response = app.send(get("/anime/naruto"));

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
