//! Generation pipeline: one serialized inference call per request.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::engine_handle::EngineHandle;
use super::sanitize::sanitize_output;
use crate::domain::{ChatMessage, DecodingPreset, GenerationRequest, GenerationResult};
use crate::ports::{CompletionRequest, CoreError, EngineLoadError, InferenceError};
use crate::prompt::PromptCompiler;

/// Characters of output included in the per-request log line.
const LOG_PREVIEW_CHARS: usize = 100;

/// Failure of a single pipeline run.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    EngineLoad(#[from] EngineLoadError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl From<GenerationError> for CoreError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::EngineLoad(e) => Self::EngineLoad(e),
            GenerationError::Inference(e) => Self::Inference(e),
        }
    }
}

/// Drives the engine.
///
/// The engine is not safe for concurrent generation, so every call goes
/// through `gate`. Tokio's mutex queues waiters in FIFO order and the guard
/// is released on every exit path, including cancellation of the caller.
pub struct GenerationPipeline {
    engine: Arc<EngineHandle>,
    compiler: PromptCompiler,
    gate: Mutex<()>,
}

impl GenerationPipeline {
    pub fn new(engine: Arc<EngineHandle>) -> Self {
        Self {
            engine,
            compiler: PromptCompiler::new(),
            gate: Mutex::new(()),
        }
    }

    pub fn engine(&self) -> &Arc<EngineHandle> {
        &self.engine
    }

    /// Run one compiled prompt through the engine.
    pub async fn run(
        &self,
        prompt: String,
        preset: &DecodingPreset,
    ) -> Result<GenerationResult, GenerationError> {
        let engine = self.engine.acquire().await?;
        let request = CompletionRequest::with_preset(prompt, preset);

        let (completion, latency_seconds) = {
            let _guard = self.gate.lock().await;
            let started = Instant::now();
            let completion = engine.complete(request).await?;
            (completion, started.elapsed().as_secs_f64())
        };

        let text = sanitize_output(&completion.text, preset.truncate_at);
        let tokens = completion.usage.unwrap_or_default();

        let preview: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
        info!(
            target: "edgewriter.generate",
            preset = preset.name,
            latency_s = latency_seconds,
            prompt_tokens = tokens.prompt,
            completion_tokens = tokens.completion,
            total_tokens = tokens.total,
            output = %preview,
            "Generation finished"
        );

        Ok(GenerationResult {
            text,
            latency_seconds,
            tokens,
            raw_output: completion.text,
        })
    }

    /// Task mode: validate, compile and run with the task preset.
    pub async fn generate(&self, req: &GenerationRequest) -> Result<GenerationResult, CoreError> {
        if req.text.trim().is_empty() {
            return Err(CoreError::Validation("text must not be empty".into()));
        }
        debug!(task = %req.task, tone = %req.tone, chars = req.text.len(), "Compiling task prompt");

        let prompt = self.compiler.compile_task(req);
        Ok(self.run(prompt, &DecodingPreset::TASK).await?)
    }

    /// Chat mode: compile the history window and run with the chat preset.
    pub async fn chat(&self, history: &[ChatMessage]) -> Result<GenerationResult, CoreError> {
        debug!(messages = history.len(), "Compiling chat prompt");

        let prompt = self.compiler.compile_chat(history);
        Ok(self.run(prompt, &DecodingPreset::CHAT).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TokenUsage;
    use crate::ports::{Completion, EngineLoader, InferenceEngine};
    use async_trait::async_trait;

    struct CannedEngine {
        text: &'static str,
        usage: Option<TokenUsage>,
    }

    #[async_trait]
    impl InferenceEngine for CannedEngine {
        async fn complete(&self, _request: CompletionRequest) -> Result<Completion, InferenceError> {
            Ok(Completion {
                text: self.text.to_string(),
                usage: self.usage,
            })
        }
    }

    struct CannedLoader(&'static str, Option<TokenUsage>);

    #[async_trait]
    impl EngineLoader for CannedLoader {
        fn model_id(&self) -> String {
            "canned".into()
        }

        async fn load(&self) -> Result<Arc<dyn InferenceEngine>, EngineLoadError> {
            Ok(Arc::new(CannedEngine {
                text: self.0,
                usage: self.1,
            }))
        }
    }

    fn pipeline(text: &'static str, usage: Option<TokenUsage>) -> GenerationPipeline {
        GenerationPipeline::new(Arc::new(EngineHandle::new(Arc::new(CannedLoader(
            text, usage,
        )))))
    }

    #[tokio::test]
    async fn test_run_sanitizes_and_keeps_raw() {
        let p = pipeline("  Clean text.<|end|>junk ", None);
        let result = p.run("prompt".into(), &DecodingPreset::CHAT).await.unwrap();
        assert_eq!(result.text, "Clean text.");
        assert_eq!(result.raw_output, "  Clean text.<|end|>junk ");
        assert!(result.latency_seconds >= 0.0);
    }

    #[tokio::test]
    async fn test_missing_usage_defaults_to_zero() {
        let p = pipeline("ok", None);
        let result = p.run("prompt".into(), &DecodingPreset::TASK).await.unwrap();
        assert_eq!(result.tokens, TokenUsage::default());
    }

    #[tokio::test]
    async fn test_reported_usage_is_passed_through() {
        let usage = TokenUsage {
            prompt: 40,
            completion: 8,
            total: 48,
        };
        let p = pipeline("ok", Some(usage));
        let result = p.run("prompt".into(), &DecodingPreset::TASK).await.unwrap();
        assert_eq!(result.tokens, usage);
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_before_load() {
        let p = pipeline("ok", None);
        let req = GenerationRequest::from_labels("Summarize", None, None, "   \n");
        let err = p.generate(&req).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(!p.engine().is_loaded());
    }
}
