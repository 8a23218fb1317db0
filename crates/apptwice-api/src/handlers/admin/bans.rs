//! Ban administration.

use std::time::Duration;

use axum::Json;
use axum::extract::State;
use validator::Validate;

use apptwice_entity::session::Session;

use crate::dto::request::TokenListRequest;
use crate::dto::response::BanInfo;
use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// POST /admin/ban
pub async fn ban(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TokenListRequest>,
) -> Result<Json<BanInfo<Vec<Session>>>, ApiError> {
    req.validate()?;
    let report = state
        .gateway
        .ban(req.user_id, &req.tokens, req.ttl.map(Duration::from_secs))
        .await?;

    Ok(Json(BanInfo {
        kind: "ban".to_string(),
        count: report.sessions.len(),
        tokens: report.sessions,
        at: report.at,
    }))
}

/// POST /admin/unban
pub async fn unban(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TokenListRequest>,
) -> Result<Json<BanInfo<Vec<String>>>, ApiError> {
    req.validate()?;
    let report = state.gateway.unban(req.user_id, &req.tokens).await?;

    Ok(Json(BanInfo {
        kind: "unban".to_string(),
        count: report.tokens.len(),
        tokens: report.tokens,
        at: report.at,
    }))
}
