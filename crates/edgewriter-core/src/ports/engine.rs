//! Inference engine port.
//!
//! The core never talks to a model directly. An [`EngineLoader`] produces an
//! [`InferenceEngine`] once; the engine handle in `services` makes sure that
//! happens at most once per process.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{DecodingPreset, TokenUsage};

/// Errors that can occur while loading the model.
///
/// This is `Clone` because a failed load is remembered and handed to every
/// later caller of the engine handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineLoadError {
    /// The configured model file does not exist.
    #[error("Model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// The engine refused the model (bad format, out of memory, crashed).
    #[error("Model load rejected: {0}")]
    Rejected(String),

    /// The loading task ended without producing a result.
    #[error("Model load aborted")]
    Aborted,
}

/// Errors from a single inference call.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The engine could not be reached.
    #[error("Engine unavailable: {0}")]
    Unavailable(String),

    /// The engine answered with something we could not use.
    #[error("Invalid engine response: {0}")]
    InvalidResponse(String),

    /// Any other failure reported by the engine.
    #[error("Inference failed: {0}")]
    Failed(String),
}

/// One completion call: a compiled prompt plus the decoding parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub repeat_penalty: f32,
    pub stop: Vec<String>,
}

impl CompletionRequest {
    /// Pair a prompt with a fixed preset.
    pub fn with_preset(prompt: impl Into<String>, preset: &DecodingPreset) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: preset.max_tokens,
            temperature: preset.temperature,
            top_p: preset.top_p,
            repeat_penalty: preset.repeat_penalty,
            stop: preset.stop.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Raw engine output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    /// `None` when the engine does not report token counters.
    pub usage: Option<TokenUsage>,
}

/// A loaded model that can produce completions.
///
/// Implementations must tolerate being called from several tasks, but the
/// pipeline never issues two calls at the same time.
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, InferenceError>;
}

/// Knows how to bring a model into memory.
#[async_trait]
pub trait EngineLoader: Send + Sync {
    /// Human-readable model identifier reported by the health endpoint.
    fn model_id(&self) -> String;

    /// Perform the (expensive) load.
    async fn load(&self) -> Result<Arc<dyn InferenceEngine>, EngineLoadError>;
}
