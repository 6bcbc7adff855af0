//! Test the max+1 id policy under delete-then-add sequences.

use std::collections::HashSet;

use axum::http::StatusCode;

use crate::e2e_tests::helpers::*;

#[test]
fn test_removing_highest_id_lets_it_be_reissued() {
    let app = TestApp::new();
    let token = app.token_for("alice");

    assert_eq!(
        app.send(delete_anime(3, Some(&token))).status,
        StatusCode::NO_CONTENT
    );
    let response = app.send(post_anime(Some(&token), &new_entry("Frieren")));

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["id"], 3);
    assert_eq!(app.send(get("/anime/3")).body["title"], "Frieren");
}

#[test]
fn test_removing_lower_id_does_not_fill_gap() {
    let app = TestApp::new();
    let token = app.token_for("alice");

    app.send(delete_anime(1, Some(&token)));
    let response = app.send(post_anime(Some(&token), &new_entry("Frieren")));

    assert_eq!(response.body["id"], 4);
    assert_eq!(listed_ids(&app), vec![2, 3, 4]);
}

#[test]
fn test_ids_unique_after_mixed_sequence() {
    let app = TestApp::new();
    let token = app.token_for("alice");

    let steps: [(bool, i64); 8] = [
        (true, 0),
        (false, 4),
        (true, 0),
        (false, 2),
        (true, 0),
        (true, 0),
        (false, 5),
        (true, 0),
    ];
    for (is_add, id) in steps {
        if is_add {
            app.send(post_anime(Some(&token), &new_entry("Filler")));
        } else {
            app.send(delete_anime(id, Some(&token)));
        }

        let ids = listed_ids(&app);
        let unique: HashSet<u64> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len(), "duplicate id in {ids:?}");
    }
}
