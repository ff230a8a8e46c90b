//! Command builder and log streaming for llama-server.

use std::net::TcpListener;
use std::path::Path;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::debug;

use crate::llama::{EngineSettings, LlamaServerError};

/// Ask the OS for a free loopback port.
///
/// The listener is dropped before llama-server binds, so a race with
/// another process is possible but harmless: the health wait then fails
/// with a clear error.
pub fn pick_free_port() -> Result<u16, LlamaServerError> {
    TcpListener::bind(("127.0.0.1", 0))
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .map_err(|e| LlamaServerError::NoFreePort(e.to_string()))
}

/// Build the llama-server command line for `settings`.
pub fn build_command(settings: &EngineSettings, port: u16) -> Command {
    let mut cmd = Command::new(&settings.llama_server);
    cmd.arg("-m")
        .arg(&settings.model_path)
        .arg("--host")
        .arg("127.0.0.1")
        .arg("--port")
        .arg(port.to_string())
        .arg("-c")
        .arg(settings.context_size.to_string())
        .arg("-b")
        .arg(settings.batch_size.to_string())
        .arg("-ngl")
        .arg(settings.gpu_layers.to_string());

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

/// Spawn llama-server for `settings` on `port`.
pub fn build_and_spawn(settings: &EngineSettings, port: u16) -> Result<Child, LlamaServerError> {
    let binary = Path::new(&settings.llama_server);
    // Bare names are looked up on PATH by the OS; explicit paths are checked here
    if binary.components().count() > 1 && !binary.exists() {
        return Err(LlamaServerError::BinaryNotFound(binary.to_path_buf()));
    }

    build_command(settings, port)
        .spawn()
        .map_err(|e| LlamaServerError::SpawnFailed {
            binary: binary.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Forward the child's stdout/stderr lines to tracing.
///
/// The reader tasks exit when the streams close.
pub fn spawn_log_readers(child: &mut Child, port: u16) {
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(text)) = lines.next_line().await {
                debug!(target: "edgewriter.llama", port, "stdout: {text}");
            }
        });
    }

    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(text)) = lines.next_line().await {
                debug!(target: "edgewriter.llama", port, "stderr: {text}");
            }
        });
    }
}
