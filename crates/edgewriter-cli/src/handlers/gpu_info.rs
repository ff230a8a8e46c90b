//! GPU info command handler.

use edgewriter_core::{SystemInfo, SystemProbePort};

use crate::error::CliError;

/// Render the probe result exactly as `GET /api/gpu-info` returns it.
pub fn render(probe: &dyn SystemProbePort) -> Result<String, CliError> {
    let info: SystemInfo = probe.system_info();
    Ok(serde_json::to_string_pretty(&info)?)
}

/// Print detected GPUs and RAM.
pub fn execute(probe: &dyn SystemProbePort) -> Result<(), CliError> {
    println!("{}", render(probe)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgewriter_core::{GpuDevice, GpuKind};

    struct CannedProbe;

    impl SystemProbePort for CannedProbe {
        fn detect_gpus(&self) -> Vec<GpuDevice> {
            vec![GpuDevice::new("Intel(R) UHD Graphics 620", GpuKind::Integrated, "1024 MB")]
        }

        fn total_ram_gb(&self) -> Option<u64> {
            None
        }
    }

    #[test]
    fn test_render_matches_http_shape() {
        let json: serde_json::Value = serde_json::from_str(&render(&CannedProbe).unwrap()).unwrap();
        assert_eq!(json["gpus"][0]["type"], "Integrated");
        assert_eq!(json["gpus"][0]["memory"], "1024 MB");
        assert!(json["ramGB"].is_null());
    }
}
