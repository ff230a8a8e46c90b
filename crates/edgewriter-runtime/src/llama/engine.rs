use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::process::Child;
use tracing::{debug, info, warn};

use edgewriter_core::{
    Completion, CompletionRequest, EngineLoadError, EngineLoader, InferenceEngine,
    InferenceError, TokenUsage,
};

use super::{EngineSettings, LlamaServerError};
use crate::command::{build_and_spawn, pick_free_port, spawn_log_readers};
use crate::health::wait_for_http_health;

/// Starts llama-server on first use.
#[derive(Debug, Clone)]
pub struct LlamaServerLoader {
    settings: EngineSettings,
}

impl LlamaServerLoader {
    pub const fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}

#[async_trait]
impl EngineLoader for LlamaServerLoader {
    fn model_id(&self) -> String {
        self.settings.model_name.clone()
    }

    async fn load(&self) -> Result<Arc<dyn InferenceEngine>, EngineLoadError> {
        let engine = LlamaServerEngine::start(&self.settings).await?;
        Ok(Arc::new(engine))
    }
}

/// Body of `POST /completion`.
#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    prompt: &'a str,
    n_predict: u32,
    temperature: f32,
    top_p: f32,
    repeat_penalty: f32,
    stop: &'a [String],
    cache_prompt: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    content: String,
    #[serde(default)]
    tokens_evaluated: Option<u64>,
    #[serde(default)]
    tokens_predicted: Option<u64>,
}

impl CompletionResponse {
    fn usage(&self) -> Option<TokenUsage> {
        if self.tokens_evaluated.is_none() && self.tokens_predicted.is_none() {
            return None;
        }
        let prompt = self.tokens_evaluated.unwrap_or_default();
        let completion = self.tokens_predicted.unwrap_or_default();
        Some(TokenUsage {
            prompt,
            completion,
            total: prompt + completion,
        })
    }
}

/// A running llama-server instance.
pub struct LlamaServerEngine {
    client: Client,
    port: u16,
    /// `None` when attached to a server this process did not start.
    child: Option<Mutex<Child>>,
}

impl LlamaServerEngine {
    /// Spawn llama-server and wait until the model is loaded.
    pub async fn start(settings: &EngineSettings) -> Result<Self, LlamaServerError> {
        ensure_model_exists(&settings.model_path).await?;

        let port = pick_free_port()?;
        let mut child = build_and_spawn(settings, port)?;
        spawn_log_readers(&mut child, port);
        info!(
            target: "edgewriter.llama",
            model = %settings.model_path.display(),
            port,
            pid = ?child.id(),
            "Spawned llama-server"
        );

        let timeout_secs = settings.ready_timeout.as_secs().max(1);
        tokio::select! {
            ready = wait_for_http_health(port, timeout_secs) => {
                ready.map_err(|e| LlamaServerError::NotReady(e.to_string()))?;
            }
            exited = child.wait() => {
                let status = exited.map_or_else(|e| e.to_string(), |s| s.to_string());
                return Err(LlamaServerError::ExitedEarly(status));
            }
        }

        Ok(Self {
            client: Client::new(),
            port,
            child: Some(Mutex::new(child)),
        })
    }

    /// Use a llama-server that is already listening on `port`.
    pub fn attach(port: u16) -> Self {
        Self {
            client: Client::new(),
            port,
            child: None,
        }
    }

    pub const fn port(&self) -> u16 {
        self.port
    }

    fn exit_status(&self) -> Option<String> {
        let mut child = self.child.as_ref()?.lock().ok()?;
        child.try_wait().ok().flatten().map(|s| s.to_string())
    }

    fn transport_error(&self, err: &reqwest::Error) -> InferenceError {
        match self.exit_status() {
            Some(status) => InferenceError::Unavailable(format!("llama-server exited ({status})")),
            None => InferenceError::Unavailable(err.to_string()),
        }
    }
}

async fn ensure_model_exists(path: &Path) -> Result<(), LlamaServerError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(LlamaServerError::ModelNotFound(path.to_path_buf())),
    }
}

#[async_trait]
impl InferenceEngine for LlamaServerEngine {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, InferenceError> {
        let url = format!("http://127.0.0.1:{}/completion", self.port);
        let body = CompletionBody {
            prompt: &request.prompt,
            n_predict: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            repeat_penalty: request.repeat_penalty,
            stop: &request.stop,
            cache_prompt: true,
        };
        debug!(target: "edgewriter.llama", prompt_chars = request.prompt.len(), "POST /completion");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(target: "edgewriter.llama", %status, "Completion request failed");
            return Err(InferenceError::Failed(format!(
                "llama-server returned {status}: {detail}"
            )));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;
        let usage = parsed.usage();

        Ok(Completion {
            text: parsed.content,
            usage,
        })
    }
}
