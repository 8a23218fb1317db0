//! Integration tests for credential issuance, rotation, and verification.

use axum::body::Body;
use axum::http::{Request, StatusCode};

use apptwice_auth::SessionStore;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_session_then_refresh_rotates() {
    let app = TestApp::new().await;
    let client = app.register_client("Rotation Co").await;

    let first = app.authorize(&client, "session", None).await;
    assert_eq!(first.status, StatusCode::OK, "{}", first.body);
    assert_eq!(first.body["token_type"], "Bearer");
    assert_eq!(first.body["expires_in"], 900);
    let access = first.body["access_token"].as_str().unwrap();
    let refresh = first.body["refresh_token"].as_str().unwrap().to_string();
    assert!(!access.is_empty());
    assert!(!refresh.is_empty());

    let second = app.authorize(&client, "refresh_token", Some(refresh.as_str())).await;
    assert_eq!(second.status, StatusCode::OK, "{}", second.body);
    let rotated = second.body["refresh_token"].as_str().unwrap();
    assert_ne!(rotated, refresh);

    let replay = app.authorize(&client, "refresh_token", Some(refresh.as_str())).await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.body["error"], "session_not_found");
}

#[tokio::test]
async fn test_simple_grant_over_form() {
    let app = TestApp::new().await;
    let client = app.register_client("Form Co").await;

    let form = format!(
        "access_type=simple&client_id={}&client_secret={}",
        client.client_id, client.client_secret
    );
    let response = app.post_form("/authorize", &form).await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert!(response.body["access_token"].as_str().is_some());
    assert!(response.body.get("refresh_token").is_none());
    assert!(app.sessions.list_by_user(client.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_access_type_is_client_error() {
    let app = TestApp::new().await;
    let client = app.register_client("Typo Co").await;

    let response = app.authorize(&client, "password", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["status"], 400);
    assert_eq!(response.body["error"], "unrecognized_access_type");
}

#[tokio::test]
async fn test_wrong_secret_is_rejected() {
    let app = TestApp::new().await;
    let mut client = app.register_client("Leaky Co").await;
    client.client_secret = "0".repeat(64);

    let response = app.authorize(&client, "session", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "invalid_client");
}

#[tokio::test]
async fn test_missing_refresh_token_is_client_error() {
    let app = TestApp::new().await;
    let client = app.register_client("Forgetful Co").await;

    let response = app.authorize(&client, "refresh_token", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "missing_refresh_token");
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = TestApp::new().await;

    let req = Request::builder()
        .method("POST")
        .uri("/authorize")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "malformed_request");
}

#[tokio::test]
async fn test_session_requires_credential() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/session", None, &[]).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["status"], 401);
    assert_eq!(response.body["error"], "missing_credential");
}

#[tokio::test]
async fn test_error_bodies_are_per_request() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/session", None, &[]).await;
    let invalid = app
        .request("GET", "/session", None, &[("Authorization", "Bearer garbage")])
        .await;
    let missing_again = app.request("GET", "/session", None, &[]).await;

    assert_eq!(invalid.body["error"], "invalid_token");
    assert_ne!(missing.body["additional"], invalid.body["additional"]);
    assert_eq!(missing.body, missing_again.body);
}

#[tokio::test]
async fn test_session_accepts_bearer_and_cookie() {
    let app = TestApp::new().await;
    let client = app.register_client("Introspect Co").await;
    let grant = app.authorize(&client, "session", None).await;
    let access = grant.body["access_token"].as_str().unwrap();
    let refresh = grant.body["refresh_token"].as_str().unwrap();

    let bearer = format!("Bearer {access}");
    let by_header = app
        .request("GET", "/session", None, &[("Authorization", &bearer)])
        .await;
    assert_eq!(by_header.status, StatusCode::OK, "{}", by_header.body);
    assert_eq!(by_header.body["user_id"], client.id);
    assert_eq!(by_header.body["refresh_token"], refresh);

    let cookie = format!("{}={access}", app.state.config.auth.cookie_name);
    let by_cookie = app
        .request("GET", "/session", None, &[("Cookie", &cookie)])
        .await;
    assert_eq!(by_cookie.status, StatusCode::OK, "{}", by_cookie.body);
    assert_eq!(by_cookie.body["user_id"], client.id);
}

#[tokio::test]
async fn test_origin_is_recorded() {
    let app = TestApp::new().await;
    let client = app.register_client("Origin Co").await;

    let body = serde_json::json!({
        "access_type": "session",
        "client_id": client.client_id,
        "client_secret": client.client_secret,
    });
    let response = app
        .request(
            "POST",
            "/authorize",
            Some(body),
            &[
                ("User-Agent", "origin-test/2.0"),
                ("X-Forwarded-For", "203.0.113.9, 10.1.1.1"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);

    let sessions = app.sessions.list_by_user(client.id).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].user_agent, "origin-test/2.0");
    assert_eq!(sessions[0].ip, "203.0.113.9");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::new().await;
    let client = app.register_client("Logout Co").await;
    let grant = app.authorize(&client, "session", None).await;
    let refresh = grant.body["refresh_token"].as_str().unwrap();

    let response = app
        .request(
            "POST",
            "/logout",
            Some(serde_json::json!({ "refresh_token": refresh })),
            &[],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);

    let reuse = app.authorize(&client, "refresh_token", Some(refresh)).await;
    assert_eq!(reuse.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reuse.body["error"], "session_not_found");
}

#[tokio::test]
async fn test_quota_overflow_over_http() {
    let app = TestApp::new().await;
    let client = app.register_client("Busy Co").await;

    for _ in 0..6 {
        let response = app.authorize(&client, "session", None).await;
        assert_eq!(response.status, StatusCode::OK);
    }
    assert_eq!(app.sessions.list_by_user(client.id).await.unwrap().len(), 6);

    let last = app.authorize(&client, "session", None).await;
    let sessions = app.sessions.list_by_user(client.id).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(
        Some(sessions[0].refresh_token.as_str()),
        last.body["refresh_token"].as_str()
    );
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/health", None, &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["cache"], true);
}
