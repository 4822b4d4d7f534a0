//! Integration tests for the public share redemption endpoint.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

async fn mint_trip_link(app: &TestApp, owner: Uuid, trip: Uuid) -> (String, String) {
    let response = app
        .request(
            "POST",
            "/api/share-links",
            Some(json!({ "scope": "trip", "target_id": trip })),
            Some(&app.owner_token(owner)),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    let data = &response.body["data"];
    (
        data["id"].as_str().unwrap().to_string(),
        data["token"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn redeeming_a_live_link_returns_the_trip() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_test_profile("mika").await;
    let trip = app.create_test_trip(owner, "Kyoto in autumn").await;
    let (_, token) = mint_trip_link(&app, owner, trip).await;

    let response = app.request("GET", &format!("/share/{token}"), None, None).await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.headers["cache-control"], "no-store");
    assert_eq!(response.body["data"]["scope"], "trip");
    assert_eq!(response.body["data"]["trip"]["title"], "Kyoto in autumn");
}

#[tokio::test]
async fn unknown_revoked_and_deleted_all_read_the_same() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_test_profile("mika").await;
    let trip = app.create_test_trip(owner, "Porto").await;
    let (id, token) = mint_trip_link(&app, owner, trip).await;

    let unknown = app
        .request("GET", &format!("/share/{}", "x".repeat(43)), None, None)
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let revoke = app
        .request(
            "DELETE",
            &format!("/api/share-links/{id}"),
            None,
            Some(&app.owner_token(owner)),
        )
        .await;
    assert_eq!(revoke.status, StatusCode::OK);

    let revoked = app.request("GET", &format!("/share/{token}"), None, None).await;
    assert_eq!(revoked.status, StatusCode::NOT_FOUND);

    // A dead link reads identically whatever killed it.
    assert_eq!(unknown.body, revoked.body);

    let trip2 = app.create_test_trip(owner, "Faro").await;
    let (_, token2) = mint_trip_link(&app, owner, trip2).await;
    app.soft_delete_trip(trip2).await;

    let deleted = app.request("GET", &format!("/share/{token2}"), None, None).await;
    assert_eq!(deleted.status, StatusCode::NOT_FOUND);
    assert_eq!(deleted.body, unknown.body);
}

#[tokio::test]
async fn rotation_invalidates_the_old_token() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_test_profile("mika").await;
    let trip = app.create_test_trip(owner, "Tromsø").await;
    let (id, old_token) = mint_trip_link(&app, owner, trip).await;

    let rotated = app
        .request(
            "POST",
            &format!("/api/share-links/{id}/rotate"),
            None,
            Some(&app.owner_token(owner)),
        )
        .await;
    assert_eq!(rotated.status, StatusCode::OK);
    let new_token = rotated.body["data"]["token"].as_str().unwrap().to_string();
    assert_ne!(new_token, old_token);

    let old = app
        .request("GET", &format!("/share/{old_token}"), None, None)
        .await;
    assert_eq!(old.status, StatusCode::NOT_FOUND);

    let new = app
        .request("GET", &format!("/share/{new_token}"), None, None)
        .await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn rotation_revives_a_revoked_link() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_test_profile("mika").await;
    let trip = app.create_test_trip(owner, "Seoul").await;
    let (id, _) = mint_trip_link(&app, owner, trip).await;
    let token = app.owner_token(owner);

    let revoke = app
        .request("DELETE", &format!("/api/share-links/{id}"), None, Some(&token))
        .await;
    assert_eq!(revoke.status, StatusCode::OK);

    let rotated = app
        .request(
            "POST",
            &format!("/api/share-links/{id}/rotate"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(rotated.status, StatusCode::OK);
    assert!(rotated.body["data"]["revoked_at"].is_null());

    let new_token = rotated.body["data"]["token"].as_str().unwrap();
    let response = app
        .request("GET", &format!("/share/{new_token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn expired_links_are_dead() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_test_profile("mika").await;
    let trip = app.create_test_trip(owner, "Quito").await;

    let created = app
        .request(
            "POST",
            "/api/share-links",
            Some(json!({
                "scope": "trip",
                "target_id": trip,
                "expires_at": chrono::Utc::now() - chrono::Duration::minutes(1),
            })),
            Some(&app.owner_token(owner)),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let token = created.body["data"]["token"].as_str().unwrap();

    let response = app.request("GET", &format!("/share/{token}"), None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn hammering_one_token_hits_the_rate_limit() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_test_profile("mika").await;
    let trip = app.create_test_trip(owner, "Marrakesh").await;
    let (_, token) = mint_trip_link(&app, owner, trip).await;
    let path = format!("/share/{token}");

    // Default policy allows 60 requests per window per key.
    let mut last = None;
    for _ in 0..61 {
        last = Some(app.request("GET", &path, None, None).await);
    }

    let denied = last.unwrap();
    assert_eq!(denied.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(denied.headers["cache-control"], "no-store");
    let retry_after: u64 = denied.headers["retry-after"]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after >= 1);
}

#[tokio::test]
async fn profile_links_never_include_deleted_trips() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_test_profile("mika").await;
    let kept = app.create_test_trip(owner, "Kept trip").await;
    let dropped = app.create_test_trip(owner, "Dropped trip").await;
    app.soft_delete_trip(dropped).await;
    let _ = kept;

    let created = app
        .request(
            "POST",
            "/api/share-links",
            Some(json!({ "scope": "profile" })),
            Some(&app.owner_token(owner)),
        )
        .await;
    let token = created.body["data"]["token"].as_str().unwrap();

    let response = app.request("GET", &format!("/share/{token}"), None, None).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let trips = response.body["data"]["trips"].as_array().unwrap();
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0]["title"], "Kept trip");
}
