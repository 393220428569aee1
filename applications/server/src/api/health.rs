/// Liveness endpoint
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub realm: String,
    /// Whether an admin token for the identity backend is currently held
    pub backend_token: bool,
}

/// GET /health
///
/// Never calls the identity backend; a missing token is refreshed on the
/// next admin request.
pub async fn health(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        realm: app_state.identity.realm().to_string(),
        backend_token: app_state.identity.token().await.is_some(),
    })
}
