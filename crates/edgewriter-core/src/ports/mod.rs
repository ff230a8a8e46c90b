//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no process, filesystem or HTTP details.

pub mod engine;
pub mod system_probe;

use thiserror::Error;

pub use engine::{
    Completion, CompletionRequest, EngineLoadError, EngineLoader, InferenceEngine, InferenceError,
};
pub use system_probe::{GpuDevice, GpuKind, SystemInfo, SystemProbePort};

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes, CLI exit
/// codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The model could not be loaded. Sticky for the life of the process.
    #[error(transparent)]
    EngineLoad(#[from] EngineLoadError),

    /// A single inference call failed.
    #[error(transparent)]
    Inference(#[from] InferenceError),
}
