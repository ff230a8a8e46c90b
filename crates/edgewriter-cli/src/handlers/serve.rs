//! Serve command handler.

use edgewriter_axum::{ServerConfig, start_server};
use tracing::{info, warn};

use crate::error::CliError;

/// A failed model load is cached until the process exits.
const MISSING_MODEL_WARNING: &str =
    "Model file not found; generation requests will fail, restart after adding the model";

/// Run the server until Ctrl-C.
pub async fn execute(config: ServerConfig) -> Result<(), CliError> {
    if !config.engine.model_path.exists() {
        warn!(
            model_path = %config.engine.model_path.display(),
            "{}",
            MISSING_MODEL_WARNING
        );
    }
    if !config.weights_path.exists() {
        warn!(
            weights_path = %config.weights_path.display(),
            "Weights asset not found; /weights-asset will return 404"
        );
    }

    start_server(config, shutdown_signal())
        .await
        .map_err(|e| CliError::Server(format!("{e:#}")))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C; running until killed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_warning_asks_for_restart() {
        assert!(MISSING_MODEL_WARNING.contains("restart"));
        assert!(!MISSING_MODEL_WARNING.contains("until it exists"));
    }
}
