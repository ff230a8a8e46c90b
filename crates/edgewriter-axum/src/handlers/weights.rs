//! Weights asset handler.

use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::Response;

use crate::error::HttpError;
use crate::range_server::serve_file;
use crate::state::AppState;

/// Stream the weights file. Independent of the engine and its lock.
pub async fn weights(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let range = match headers.get(header::RANGE).map(|v| v.to_str()) {
        None => None,
        Some(Ok(value)) => Some(value),
        // Non-ASCII range headers cannot be valid
        Some(Err(_)) => Some(""),
    };

    Ok(serve_file(&state.weights_path, range).await?)
}
