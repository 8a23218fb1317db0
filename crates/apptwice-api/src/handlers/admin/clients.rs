//! Client registration.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use apptwice_auth::IssuedClient;

use crate::dto::request::RegisterClientRequest;
use crate::error::ApiError;
use crate::extractors::JsonOrForm;
use crate::state::AppState;

/// POST /admin/clients
///
/// The plaintext secret appears in this response only.
pub async fn register(
    State(state): State<AppState>,
    JsonOrForm(req): JsonOrForm<RegisterClientRequest>,
) -> Result<(StatusCode, Json<IssuedClient>), ApiError> {
    req.validate()?;
    let issued = state.gateway.register_client(req.company.trim()).await?;
    Ok((StatusCode::CREATED, Json(issued)))
}
