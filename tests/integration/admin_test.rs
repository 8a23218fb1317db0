//! Integration tests for the key-protected admin endpoints.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use crate::helpers::{ADMIN_KEY, TestApp, test_config};

#[tokio::test]
async fn test_admin_key_is_required() {
    let app = TestApp::new().await;

    let missing = app
        .request("POST", "/admin/clients", Some(json!({ "company": "X" })), &[])
        .await;
    assert_eq!(missing.status, StatusCode::FORBIDDEN);
    assert_eq!(missing.body["error"], "forbidden");

    let wrong = app
        .request(
            "POST",
            "/admin/ban",
            Some(json!({ "user_id": 1 })),
            &[("X-Admin-Key", "guess")],
        )
        .await;
    assert_eq!(wrong.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_disabled_without_key() {
    let mut config = test_config();
    config.auth.admin_key = String::new();
    let app = TestApp::with_config(config).await;

    let response = app
        .request(
            "POST",
            "/admin/clients",
            Some(json!({ "company": "X" })),
            &[("X-Admin-Key", "")],
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_validates_company() {
    let app = TestApp::new().await;
    let response = app.admin("/admin/clients", json!({ "company": "" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "invalid_request");
}

#[tokio::test]
async fn test_ban_blocks_refresh_and_access() {
    let app = TestApp::new().await;
    let client = app.register_client("Banned Co").await;
    let grant = app.authorize(&client, "session", None).await;
    let access = grant.body["access_token"].as_str().unwrap();
    let refresh = grant.body["refresh_token"].as_str().unwrap();

    let ban = app
        .admin("/admin/ban", json!({ "user_id": client.id, "ttl": 600 }))
        .await;
    assert_eq!(ban.status, StatusCode::OK, "{}", ban.body);
    assert_eq!(ban.body["type"], "ban");
    assert_eq!(ban.body["count"], 1);
    assert_eq!(ban.body["tokens"][0]["refresh_token"], refresh);
    assert!(ban.body["at"].as_str().is_some());

    let bearer = format!("Bearer {access}");
    let introspect = app
        .request("GET", "/session", None, &[("Authorization", &bearer)])
        .await;
    assert_eq!(introspect.status, StatusCode::UNAUTHORIZED);
    assert_eq!(introspect.body["error"], "session_banned");

    let rotate = app.authorize(&client, "refresh_token", Some(refresh)).await;
    assert_eq!(rotate.status, StatusCode::UNAUTHORIZED);
    assert_eq!(rotate.body["error"], "session_banned");
}

#[tokio::test]
async fn test_ban_with_unknown_token_aborts() {
    let app = TestApp::new().await;
    let client = app.register_client("Partial Co").await;
    let grant = app.authorize(&client, "session", None).await;
    let refresh = grant.body["refresh_token"].as_str().unwrap();

    let response = app
        .admin("/admin/ban", json!({ "tokens": [refresh, "no-such-token"] }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "session_not_found");

    let rotate = app.authorize(&client, "refresh_token", Some(refresh)).await;
    assert_eq!(rotate.status, StatusCode::OK, "{}", rotate.body);
}

#[tokio::test]
async fn test_unban_count_integrity() {
    let app = TestApp::new().await;
    let client = app.register_client("Unban Co").await;

    let mut tokens = Vec::new();
    for _ in 0..3 {
        let grant = app.authorize(&client, "session", None).await;
        tokens.push(grant.body["refresh_token"].as_str().unwrap().to_string());
    }

    let ban = app.admin("/admin/ban", json!({ "tokens": tokens })).await;
    assert_eq!(ban.body["count"], 3);

    let unban = app.admin("/admin/unban", json!({ "tokens": tokens })).await;
    assert_eq!(unban.status, StatusCode::OK, "{}", unban.body);
    assert_eq!(unban.body["type"], "unban");
    assert_eq!(unban.body["count"], 3);

    app.admin("/admin/ban", json!({ "tokens": tokens })).await;
    let mut with_stranger = tokens.clone();
    with_stranger.push("never-banned".to_string());
    let mismatch = app
        .admin("/admin/unban", json!({ "tokens": with_stranger }))
        .await;
    assert_eq!(mismatch.status, StatusCode::CONFLICT);
    assert_eq!(mismatch.body["error"], "unexpected_deletion_count");

    let rotate = app.authorize(&client, "refresh_token", Some(tokens[0].as_str())).await;
    assert_eq!(rotate.status, StatusCode::OK, "{}", rotate.body);
}

#[tokio::test]
async fn test_ban_rejects_zero_ttl() {
    let app = TestApp::new().await;
    let response = app
        .admin("/admin/ban", json!({ "user_id": 1, "ttl": 0 }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "invalid_request");
}

#[tokio::test]
async fn test_ban_accepts_json_only() {
    let app = TestApp::new().await;
    let client = app.register_client("Formco").await;
    let issued = app.authorize(&client, "session", None).await;
    let refresh = issued.body["refresh_token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("POST")
        .uri("/admin/ban")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("X-Admin-Key", ADMIN_KEY)
        .body(Body::from(format!("tokens={refresh}")))
        .unwrap();
    let form = app.send(req).await;
    assert_eq!(form.status, StatusCode::BAD_REQUEST);
    assert_eq!(form.body["error"], "malformed_request");

    let json = app.admin("/admin/ban", json!({ "tokens": [refresh] })).await;
    assert_eq!(json.status, StatusCode::OK, "{}", json.body);
    assert_eq!(json.body["count"], 1);
}
