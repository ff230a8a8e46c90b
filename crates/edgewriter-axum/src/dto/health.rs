use edgewriter_core::EngineStatus;
use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub model_loaded: bool,
    /// `uninitialized`, `loading`, `ready` or `failed`.
    pub engine_state: String,
}

impl HealthResponse {
    pub fn new(model: impl Into<String>, engine: EngineStatus) -> Self {
        Self {
            status: "ok".to_string(),
            model: model.into(),
            model_loaded: engine == EngineStatus::Ready,
            engine_state: engine.to_string().to_lowercase(),
        }
    }
}
