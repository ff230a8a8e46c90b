//! Core services: engine lifecycle, generation and output cleanup.

pub mod engine_handle;
pub mod pipeline;
pub mod sanitize;

pub use engine_handle::{EngineHandle, EngineState, EngineStatus};
pub use pipeline::{GenerationError, GenerationPipeline};
pub use sanitize::sanitize_output;
