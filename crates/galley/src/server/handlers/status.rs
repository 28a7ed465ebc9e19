//! Status endpoint handler

use axum::{extract::State, response::Json};

use crate::server::types::StatusResponse;
use crate::server::AppState;

/// GET /status - Service liveness and active search mode
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
  Json(StatusResponse {
    status: "ok".to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
    mode: state.mode.as_str().to_string(),
  })
}
