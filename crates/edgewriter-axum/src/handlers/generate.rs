//! Task-mode generation handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use edgewriter_core::GenerationRequest;
use tracing::info;

use crate::dto::{GenerateRequestDto, GenerationResponseDto};
use crate::error::HttpError;
use crate::state::AppState;

/// Run one editing task. Loads the model on first use.
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequestDto>, JsonRejection>,
) -> Result<Json<GenerationResponseDto>, HttpError> {
    let Json(body) = payload?;
    let request = GenerationRequest::from(body);

    let result = state.pipeline.generate(&request).await?;
    info!(
        task = %request.task,
        latency_s = result.latency_rounded(),
        tokens = result.tokens.total,
        "Task completed"
    );
    Ok(Json(result.into()))
}
