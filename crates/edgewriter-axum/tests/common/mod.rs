//! Shared fakes for edgewriter-axum integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use tower::ServiceExt;

use edgewriter_axum::{AxumContext, CorsConfig, create_router};
use edgewriter_core::{
    Completion, CompletionRequest, EngineLoadError, EngineLoader, GpuDevice, GpuKind,
    InferenceEngine, InferenceError, SystemProbePort, TokenUsage,
};

/// Size of the generated weights asset.
pub const ASSET_LEN: usize = 1000;

/// Engine that echoes a fixed reply and records the prompts it saw.
pub struct ScriptedEngine {
    pub reply: String,
    pub usage: Option<TokenUsage>,
    pub delay: Duration,
    pub prompts: std::sync::Mutex<Vec<CompletionRequest>>,
}

#[async_trait]
impl InferenceEngine for ScriptedEngine {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, InferenceError> {
        self.prompts.lock().unwrap().push(request);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Completion {
            text: self.reply.clone(),
            usage: self.usage,
        })
    }
}

pub struct FakeLoader {
    pub loads: AtomicUsize,
    pub engine: Arc<ScriptedEngine>,
    pub fail: Option<EngineLoadError>,
}

impl FakeLoader {
    fn build(reply: &str, usage: Option<TokenUsage>, delay: Duration) -> Self {
        Self {
            loads: AtomicUsize::new(0),
            engine: Arc::new(ScriptedEngine {
                reply: reply.to_string(),
                usage,
                delay,
                prompts: std::sync::Mutex::new(Vec::new()),
            }),
            fail: None,
        }
    }

    pub fn replying(reply: &str, usage: Option<TokenUsage>) -> Arc<Self> {
        Arc::new(Self::build(reply, usage, Duration::ZERO))
    }

    pub fn slow(reply: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self::build(reply, None, delay))
    }

    pub fn failing(err: EngineLoadError) -> Arc<Self> {
        Arc::new(Self {
            fail: Some(err),
            ..Self::build("", None, Duration::ZERO)
        })
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> CompletionRequest {
        self.engine.prompts.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl EngineLoader for FakeLoader {
    fn model_id(&self) -> String {
        "Phi-3 Mini (fine-tuned)".into()
    }

    async fn load(&self) -> Result<Arc<dyn InferenceEngine>, EngineLoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match &self.fail {
            Some(err) => Err(err.clone()),
            None => Ok(Arc::clone(&self.engine) as Arc<dyn InferenceEngine>),
        }
    }
}

pub struct FakeProbe;

impl SystemProbePort for FakeProbe {
    fn detect_gpus(&self) -> Vec<GpuDevice> {
        vec![GpuDevice::new("NVIDIA GeForce RTX 3060", GpuKind::Nvidia, "12288 MiB")]
    }

    fn total_ram_gb(&self) -> Option<u64> {
        Some(16)
    }
}

/// Byte `i` of the asset is `i % 251`, so slices are easy to check.
pub fn write_asset(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("weights.bin");
    let bytes: Vec<u8> = (0..ASSET_LEN).map(|i| u8::try_from(i % 251).unwrap()).collect();
    std::fs::File::create(&path)
        .unwrap()
        .write_all(&bytes)
        .unwrap();
    path
}

pub fn expected_slice(start: usize, end_inclusive: usize) -> Vec<u8> {
    (start..=end_inclusive)
        .map(|i| u8::try_from(i % 251).unwrap())
        .collect()
}

pub fn app(loader: Arc<FakeLoader>, weights: &Path) -> Router {
    let ctx = AxumContext::new(loader, Arc::new(FakeProbe), weights);
    create_router(ctx, &CorsConfig::AllowAll)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_range(uri: &str, range: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("range", range)
        .body(Body::empty())
        .unwrap()
}
