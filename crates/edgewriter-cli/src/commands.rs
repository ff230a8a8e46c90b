//! Subcommands and the server options they share.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Subcommand};

use edgewriter_axum::ServerConfig;
use edgewriter_runtime::EngineSettings;

use crate::error::CliError;

/// Built UI locations probed, in order, when `--static-dir` is not given.
pub const STATIC_DIR_CANDIDATES: &[&str] = &["./ui/dist", "./dist", "./ui"];

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server. The model is loaded on the first generation
    /// request, not at startup.
    Serve(ServerArgs),

    /// Print detected GPUs and total RAM as JSON
    GpuInfo,

    /// Show the resolved model, weights and UI paths
    Paths(ServerArgs),
}

/// Options shared by `serve` and `paths`.
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "EDGEWRITER_HOST", default_value = ServerConfig::DEFAULT_HOST)]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "EDGEWRITER_PORT", default_value_t = ServerConfig::DEFAULT_PORT)]
    pub port: u16,

    /// GGUF model used for generation
    #[arg(long = "model", env = "EDGEWRITER_MODEL_PATH", default_value = ServerConfig::DEFAULT_MODEL_PATH)]
    pub model_path: PathBuf,

    /// Display name reported by /health (defaults to the model file stem)
    #[arg(long)]
    pub model_name: Option<String>,

    /// Weights file served to the in-browser runtime
    #[arg(long = "weights", env = "EDGEWRITER_WEIGHTS_PATH", default_value = ServerConfig::DEFAULT_WEIGHTS_PATH)]
    pub weights_path: PathBuf,

    /// Directory containing the built web UI
    #[arg(long, env = "EDGEWRITER_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Serve API endpoints only, even if a built UI is found
    #[arg(long, conflicts_with = "static_dir")]
    pub api_only: bool,

    /// llama-server executable (name on PATH or full path)
    #[arg(long, env = "EDGEWRITER_LLAMA_SERVER", default_value = EngineSettings::DEFAULT_LLAMA_SERVER)]
    pub llama_server: PathBuf,

    /// Context window in tokens
    #[arg(long, default_value_t = EngineSettings::DEFAULT_CONTEXT_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub ctx_size: u32,

    /// Layers offloaded to the GPU (-1 = all, 0 = CPU only)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub gpu_layers: i32,

    /// Seconds to wait for the model to become ready
    #[arg(long, default_value_t = EngineSettings::DEFAULT_READY_TIMEOUT.as_secs())]
    pub ready_timeout: u64,

    /// Allowed CORS origin (repeatable). All origins are allowed if omitted.
    #[arg(long = "allow-origin")]
    pub allowed_origins: Vec<String>,
}

impl ServerArgs {
    /// Resolve into a server config, probing `cwd` for a built UI.
    pub fn into_config(self, cwd: &Path) -> Result<ServerConfig, CliError> {
        if let Some(dir) = &self.static_dir
            && !dir.is_dir()
        {
            return Err(CliError::Config(format!(
                "static directory does not exist: {}",
                dir.display()
            )));
        }
        let static_dir = resolve_static_dir(self.static_dir, self.api_only, cwd);

        let mut engine = EngineSettings::new(self.model_path)
            .with_llama_server(self.llama_server)
            .with_ready_timeout(Duration::from_secs(self.ready_timeout));
        engine.context_size = self.ctx_size;
        engine.gpu_layers = self.gpu_layers;
        if let Some(name) = self.model_name {
            engine = engine.with_model_name(name);
        }

        let mut config = ServerConfig::with_defaults()
            .with_address(self.host, self.port)
            .with_engine(engine)
            .with_weights_path(self.weights_path);
        if let Some(dir) = static_dir {
            config = config.with_static_dir(dir);
        }
        if !self.allowed_origins.is_empty() {
            config = config.with_allowed_origins(self.allowed_origins);
        }
        Ok(config)
    }
}

/// `--api-only` > explicit directory > first candidate with an `index.html`.
fn resolve_static_dir(explicit: Option<PathBuf>, api_only: bool, cwd: &Path) -> Option<PathBuf> {
    if api_only {
        return None;
    }
    explicit.or_else(|| {
        STATIC_DIR_CANDIDATES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|dir| dir.join("index.html").is_file())
    })
}
