//! Axum server bootstrap - the composition root.
//!
//! This module is the only place where the concrete engine loader and system
//! probe are wired into the HTTP adapter.

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use edgewriter_core::{EngineHandle, EngineLoader, GenerationPipeline, SystemProbePort};
use edgewriter_runtime::{DefaultSystemProbe, EngineSettings, LlamaServerLoader};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow all origins. The browser UI may be opened from a file or
    /// another local port.
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How to launch the inference engine.
    pub engine: EngineSettings,
    /// Model weights served to the in-browser runtime.
    pub weights_path: PathBuf,
    /// Optional path to static assets for SPA serving.
    pub static_dir: Option<PathBuf>,
    pub cors: CorsConfig,
}

impl ServerConfig {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 8000;
    pub const DEFAULT_MODEL_PATH: &'static str = "phi3-writing-Q8.gguf";
    pub const DEFAULT_WEIGHTS_PATH: &'static str = "weights.bin";

    /// Config with the default host, port and file names relative to the
    /// working directory.
    pub fn with_defaults() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            engine: EngineSettings::new(Self::DEFAULT_MODEL_PATH),
            weights_path: PathBuf::from(Self::DEFAULT_WEIGHTS_PATH),
            static_dir: None,
            cors: CorsConfig::default(),
        }
    }

    #[must_use]
    pub fn with_address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_engine(mut self, engine: EngineSettings) -> Self {
        self.engine = engine;
        self
    }

    #[must_use]
    pub fn with_weights_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.weights_path = path.into();
        self
    }

    /// Set the static directory for SPA serving.
    #[must_use]
    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Lazily loaded engine, shared with the pipeline.
    pub engine: Arc<EngineHandle>,
    /// Serialized generation over `engine`.
    pub pipeline: Arc<GenerationPipeline>,
    /// Hardware probe for the GPU info route.
    pub probe: Arc<dyn SystemProbePort>,
    /// File behind the weights routes.
    pub weights_path: PathBuf,
}

impl AxumContext {
    /// Wire a context from its collaborators. Nothing is loaded here.
    pub fn new(
        loader: Arc<dyn EngineLoader>,
        probe: Arc<dyn SystemProbePort>,
        weights_path: impl Into<PathBuf>,
    ) -> Self {
        let engine = Arc::new(EngineHandle::new(loader));
        let pipeline = Arc::new(GenerationPipeline::new(Arc::clone(&engine)));
        Self {
            engine,
            pipeline,
            probe,
            weights_path: weights_path.into(),
        }
    }
}

/// Build the production context: llama-server engine, OS system probe.
pub fn bootstrap(config: &ServerConfig) -> AxumContext {
    info!(
        target: "edgewriter.paths",
        model_path = %config.engine.model_path.display(),
        weights_path = %config.weights_path.display(),
        static_dir = ?config.static_dir,
        llama_server = %config.engine.llama_server.display(),
        "Axum bootstrap resolved paths"
    );

    let loader: Arc<dyn EngineLoader> = Arc::new(LlamaServerLoader::new(config.engine.clone()));
    let probe: Arc<dyn SystemProbePort> = Arc::new(DefaultSystemProbe::new());
    AxumContext::new(loader, probe, config.weights_path.clone())
}

/// Start the web server and run until `shutdown` resolves.
///
/// If `config.static_dir` is set, serves static assets with SPA fallback.
/// The model is not loaded here; the first generation request does that.
pub async fn start_server<F>(config: ServerConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let ctx = bootstrap(&config);

    let app = if let Some(ref static_dir) = config.static_dir {
        info!("Serving static assets from: {}", static_dir.display());
        crate::routes::create_spa_router(ctx, static_dir, &config.cors)
    } else {
        crate::routes::create_router(ctx, &config.cors)
    };

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local: SocketAddr = listener.local_addr()?;

    if config.static_dir.is_some() {
        info!("EdgeWriter (with UI) listening on http://{local}");
    } else {
        info!("EdgeWriter (API only) listening on http://{local}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("EdgeWriter server stopped");
    Ok(())
}
