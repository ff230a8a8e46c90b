//! Conversational handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::dto::{ChatRequestDto, GenerationResponseDto};
use crate::error::HttpError;
use crate::state::AppState;

/// Continue a conversation. Only the most recent turns reach the model.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequestDto>, JsonRejection>,
) -> Result<Json<GenerationResponseDto>, HttpError> {
    let Json(body) = payload?;
    let history = body.into_history();

    let result = state.pipeline.chat(&history).await?;
    Ok(Json(result.into()))
}
