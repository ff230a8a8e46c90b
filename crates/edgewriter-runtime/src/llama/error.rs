//! Error types for the llama-server adapter.

use std::path::PathBuf;

use edgewriter_core::EngineLoadError;
use thiserror::Error;

/// Errors from starting or supervising llama-server.
#[derive(Debug, Error)]
pub enum LlamaServerError {
    /// The model file is missing.
    #[error("Model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// An explicit llama-server path does not exist.
    #[error("llama-server binary not found at: {}", .0.display())]
    BinaryNotFound(PathBuf),

    /// The OS refused to start the process.
    #[error("Failed to spawn {}: {reason}", binary.display())]
    SpawnFailed { binary: PathBuf, reason: String },

    /// No loopback port could be reserved.
    #[error("No free port available: {0}")]
    NoFreePort(String),

    /// The process exited before becoming ready.
    #[error("llama-server exited during startup ({0})")]
    ExitedEarly(String),

    /// The readiness wait gave up.
    #[error("llama-server did not become ready: {0}")]
    NotReady(String),
}

impl From<LlamaServerError> for EngineLoadError {
    fn from(err: LlamaServerError) -> Self {
        match err {
            LlamaServerError::ModelNotFound(path) => Self::ModelNotFound(path),
            other => Self::Rejected(other.to_string()),
        }
    }
}
