//! Hardware information handler.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use edgewriter_core::SystemInfo;
use tracing::warn;

use crate::state::AppState;

/// GPU list and total RAM.
///
/// Probing shells out to vendor tools, so it runs on the blocking pool. This
/// route never fails: a probe that dies yields an empty report.
pub async fn gpu_info(State(state): State<AppState>) -> Json<SystemInfo> {
    let probe = Arc::clone(&state.probe);
    let info = tokio::task::spawn_blocking(move || probe.system_info())
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "System probe task failed");
            SystemInfo::default()
        });
    Json(info)
}
