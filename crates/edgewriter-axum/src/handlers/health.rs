//! Liveness handler.

use axum::Json;
use axum::extract::State;

use crate::dto::HealthResponse;
use crate::state::AppState;

/// Report server status. Reads engine state without triggering a load.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::new(
        state.engine.model_id(),
        state.engine.status(),
    ))
}
