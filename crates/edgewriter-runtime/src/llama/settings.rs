use std::path::PathBuf;
use std::time::Duration;

/// How llama-server is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// llama-server executable: a bare name resolved on `PATH`, or a path.
    pub llama_server: PathBuf,
    /// GGUF model file.
    pub model_path: PathBuf,
    /// Display name reported by the health endpoint.
    pub model_name: String,
    pub context_size: u32,
    pub batch_size: u32,
    /// Layers offloaded to the GPU; `-1` offloads all of them.
    pub gpu_layers: i32,
    /// Upper bound on waiting for the model to become ready.
    pub ready_timeout: Duration,
}

impl EngineSettings {
    pub const DEFAULT_LLAMA_SERVER: &'static str = "llama-server";
    pub const DEFAULT_CONTEXT_SIZE: u32 = 4096;
    pub const DEFAULT_BATCH_SIZE: u32 = 512;
    pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(120);

    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        let model_path = model_path.into();
        let model_name = model_path
            .file_stem()
            .map_or_else(|| "model".to_string(), |s| s.to_string_lossy().into_owned());
        Self {
            llama_server: PathBuf::from(Self::DEFAULT_LLAMA_SERVER),
            model_path,
            model_name,
            context_size: Self::DEFAULT_CONTEXT_SIZE,
            batch_size: Self::DEFAULT_BATCH_SIZE,
            gpu_layers: -1,
            ready_timeout: Self::DEFAULT_READY_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_llama_server(mut self, path: impl Into<PathBuf>) -> Self {
        self.llama_server = path.into();
        self
    }

    #[must_use]
    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    #[must_use]
    pub const fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::new("/models/phi3-writing-Q8.gguf");
        assert_eq!(settings.model_name, "phi3-writing-Q8");
        assert_eq!(settings.llama_server, PathBuf::from("llama-server"));
        assert_eq!(settings.context_size, 4096);
        assert_eq!(settings.batch_size, 512);
        assert_eq!(settings.gpu_layers, -1);
        assert_eq!(settings.ready_timeout, Duration::from_secs(120));
    }
}
