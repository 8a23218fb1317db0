//! Route definitions for the AppTwice HTTP API.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    Router::new()
        .merge(auth_routes())
        .merge(admin_routes(state.clone()))
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Credential issuance and introspection
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/authorize", post(handlers::auth::authorize))
        .route("/logout", post(handlers::auth::logout))
        .route("/session", get(handlers::auth::session))
}

/// Ban administration and client registration, behind the admin key
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/ban", post(handlers::admin::bans::ban))
        .route("/admin/unban", post(handlers::admin::bans::unban))
        .route("/admin/clients", post(handlers::admin::clients::register))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::admin::require_admin_key,
        ))
}

/// Health check (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
