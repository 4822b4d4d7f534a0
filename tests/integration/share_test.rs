//! Integration tests for owner-facing share-link management.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn create_trip_link_returns_the_token_once() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_test_profile("mika").await;
    let trip = app.create_test_trip(owner, "Kyoto in autumn").await;
    let token = app.owner_token(owner);

    let response = app
        .request(
            "POST",
            "/api/share-links",
            Some(json!({ "scope": "trip", "target_id": trip })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let data = &response.body["data"];
    let raw_token = data["token"].as_str().expect("token in response");
    assert_eq!(raw_token.len(), 43);
    assert!(data.get("token_digest").is_none(), "digest must not leak");

    // The token is one-time: fetching the link again never returns it.
    let id = data["id"].as_str().unwrap();
    let fetched = app
        .request("GET", &format!("/api/share-links/{id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert!(fetched.body["data"].get("token").is_none());
}

#[tokio::test]
async fn trip_scope_requires_a_target() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_test_profile("mika").await;
    let token = app.owner_token(owner);

    let response = app
        .request(
            "POST",
            "/api/share-links",
            Some(json!({ "scope": "trip" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn profile_scope_rejects_a_target() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_test_profile("mika").await;
    let trip = app.create_test_trip(owner, "Oslo").await;
    let token = app.owner_token(owner);

    let response = app
        .request(
            "POST",
            "/api/share-links",
            Some(json!({ "scope": "profile", "target_id": trip })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn management_requires_authentication() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let response = app.request("GET", "/api/share-links", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn owners_cannot_touch_each_others_links() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let alice = app.create_test_profile("alice").await;
    let bob = app.create_test_profile("bob").await;
    let trip = app.create_test_trip(alice, "Lisbon").await;

    let created = app
        .request(
            "POST",
            "/api/share-links",
            Some(json!({ "scope": "trip", "target_id": trip })),
            Some(&app.owner_token(alice)),
        )
        .await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "DELETE",
            &format!("/api/share-links/{id}"),
            None,
            Some(&app.owner_token(bob)),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn revoke_is_idempotent() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_test_profile("mika").await;
    let token = app.owner_token(owner);

    let created = app
        .request(
            "POST",
            "/api/share-links",
            Some(json!({ "scope": "profile" })),
            Some(&token),
        )
        .await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let first = app
        .request(
            "DELETE",
            &format!("/api/share-links/{id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    let revoked_at = first.body["data"]["revoked_at"].clone();
    assert!(!revoked_at.is_null());

    let second = app
        .request(
            "DELETE",
            &format!("/api/share-links/{id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
    // The original revocation instant is preserved.
    assert_eq!(second.body["data"]["revoked_at"], revoked_at);
}

#[tokio::test]
async fn listing_filters_by_scope() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_test_profile("mika").await;
    let trip = app.create_test_trip(owner, "Hanoi").await;
    let token = app.owner_token(owner);

    for body in [
        json!({ "scope": "trip", "target_id": trip }),
        json!({ "scope": "profile" }),
    ] {
        let response = app
            .request("POST", "/api/share-links", Some(body), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let all = app
        .request("GET", "/api/share-links", None, Some(&token))
        .await;
    assert_eq!(all.body["data"]["total_items"], 2);

    let trips_only = app
        .request("GET", "/api/share-links?scope=trip", None, Some(&token))
        .await;
    assert_eq!(trips_only.body["data"]["total_items"], 1);
}
