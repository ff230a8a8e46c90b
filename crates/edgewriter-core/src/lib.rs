//! Core domain for EdgeWriter, a local text-editing assistant.
//!
//! This crate holds everything that does not depend on a transport or a
//! concrete model runtime:
//!
//! - [`domain`]: request/result types, decoding presets and byte ranges
//! - [`prompt`]: the prompt compiler
//! - [`services`]: the lazy engine handle, the generation pipeline and the
//!   output sanitizer
//! - [`ports`]: traits implemented by the runtime adapter
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod prompt;
pub mod services;

pub use domain::{
    ByteRange, CHAT_HISTORY_WINDOW, ChatMessage, ChatRole, DecodingPreset, GenerationRequest,
    GenerationResult, RangeError, RangeSpec, Task, TokenUsage, Tone,
};
pub use ports::{
    Completion, CompletionRequest, CoreError, EngineLoadError, EngineLoader, GpuDevice, GpuKind,
    InferenceEngine, InferenceError, SystemInfo, SystemProbePort,
};
pub use prompt::PromptCompiler;
pub use services::{
    EngineHandle, EngineStatus, GenerationError, GenerationPipeline, sanitize_output,
};

#[cfg(test)]
use tokio_test as _;
