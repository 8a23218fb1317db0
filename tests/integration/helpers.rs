//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use apptwice_api::{AppState, build_router, build_state};
use apptwice_auth::client::MemoryClientStore;
use apptwice_auth::session::MemorySessionStore;
use apptwice_cache::CacheManager;
use apptwice_core::config::AppConfig;
use apptwice_core::config::session::StoreBackend;

pub const ADMIN_KEY: &str = "integration-admin-key";

/// Test application over in-memory stores and cache.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct access to the gateway
    pub state: AppState,
    /// Session rows, for direct inspection
    pub sessions: Arc<MemorySessionStore>,
}

/// A client registered through the admin endpoint.
pub struct TestClient {
    pub id: i64,
    pub client_id: String,
    pub client_secret: String,
}

/// Decoded response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-jwt-secret".to_string();
    config.auth.admin_key = ADMIN_KEY.to_string();
    config.session.store = StoreBackend::Memory;
    config
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let cache = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("Failed to init cache"),
        );
        let sessions = Arc::new(MemorySessionStore::new());
        let state = build_state(
            config,
            cache,
            sessions.clone(),
            Arc::new(MemoryClientStore::new()),
        )
        .expect("Failed to build state");

        Self {
            router: build_router(state.clone()),
            state,
            sessions,
        }
    }

    /// Send a JSON request with optional headers.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        self.send(req.body(Body::from(body_str)).expect("Failed to build request"))
            .await
    }

    /// Send a form-encoded POST.
    pub async fn post_form(&self, path: &str, form: &str) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("Failed to build request");
        self.send(req).await
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Register a client through `POST /admin/clients`.
    pub async fn register_client(&self, company: &str) -> TestClient {
        let response = self
            .request(
                "POST",
                "/admin/clients",
                Some(serde_json::json!({ "company": company })),
                &[("X-Admin-Key", ADMIN_KEY)],
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

        TestClient {
            id: response.body["client"]["id"].as_i64().expect("client id"),
            client_id: response.body["client"]["client_id"]
                .as_str()
                .expect("client_id")
                .to_string(),
            client_secret: response.body["client_secret"]
                .as_str()
                .expect("client_secret")
                .to_string(),
        }
    }

    /// `POST /authorize` with JSON.
    pub async fn authorize(
        &self,
        client: &TestClient,
        access_type: &str,
        refresh_token: Option<&str>,
    ) -> TestResponse {
        let mut body = serde_json::json!({
            "access_type": access_type,
            "client_id": client.client_id,
            "client_secret": client.client_secret,
        });
        if let Some(token) = refresh_token {
            body["refresh_token"] = Value::String(token.to_string());
        }
        self.request("POST", "/authorize", Some(body), &[]).await
    }

    /// Admin JSON POST.
    pub async fn admin(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body), &[("X-Admin-Key", ADMIN_KEY)])
            .await
    }
}
