//! Readiness polling for the llama-server child.

use std::time::Duration;

use anyhow::{Result, anyhow};
use reqwest::Client;
use tokio::time::sleep;
use tracing::{debug, info};

/// Wait for llama-server's `/health` endpoint to report ready.
///
/// llama-server answers 503 while the model is still being mapped into
/// memory, so anything but a 2xx is retried until `timeout_secs` attempts
/// (one per second) have been made. A 403/404 after a few attempts means
/// some other service owns the port.
pub async fn wait_for_http_health(port: u16, timeout_secs: u64) -> Result<()> {
    let health_url = format!("http://127.0.0.1:{port}/health");
    info!("Waiting for llama-server to be ready at {health_url}");

    let client = Client::builder().timeout(Duration::from_secs(2)).build()?;
    let mut attempt = 0;

    loop {
        attempt += 1;
        sleep(Duration::from_secs(1)).await;

        match client.get(&health_url).send().await {
            Ok(response) if response.status().is_success() => {
                info!("llama-server is ready on port {port}");
                return Ok(());
            }
            Ok(response) => {
                let status = response.status();
                debug!("Health check returned status {status}, retrying...");
                if matches!(status.as_u16(), 403 | 404) && attempt > 3 {
                    return Err(anyhow!(
                        "Port {port} appears to be in use by another service (status {status})"
                    ));
                }
            }
            Err(e) => debug!("Health check failed: {e}, retrying..."),
        }

        if attempt >= timeout_secs {
            return Err(anyhow!(
                "llama-server failed to start within {timeout_secs}s on port {port}"
            ));
        }
    }
}
