//! Auth handlers: authorize, logout, session introspection.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use apptwice_auth::{AccessGrant, AccessRequest};

use crate::dto::request::LogoutRequest;
use crate::dto::response::{MessageResponse, SessionResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ClientOrigin, JsonOrForm};
use crate::state::AppState;

/// POST /authorize
pub async fn authorize(
    State(state): State<AppState>,
    ClientOrigin(origin): ClientOrigin,
    JsonOrForm(req): JsonOrForm<AccessRequest>,
) -> Result<Json<AccessGrant>, ApiError> {
    let grant = state.gateway.authenticate(req, &origin).await?;
    Ok(Json(grant))
}

/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    JsonOrForm(req): JsonOrForm<LogoutRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    req.validate()?;
    state.gateway.logout(&req.refresh_token).await?;

    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// GET /session
pub async fn session(auth: AuthUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        user_id: auth.user_id(),
        role: auth.role.clone(),
        expires_at: auth.expires_at(),
        refresh_token: auth.refresh_reference().map(String::from),
    })
}
