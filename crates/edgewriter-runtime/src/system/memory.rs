//! Physical memory detection.

use sysinfo::System;

use super::commands::command_stdout;

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Total RAM in whole GiB, or `None` if it cannot be determined.
pub fn total_ram_gb() -> Option<u64> {
    let mut sys = System::new();
    sys.refresh_memory();

    bytes_to_gib(sys.total_memory()).or_else(|| {
        if cfg!(target_os = "windows") {
            command_stdout("wmic", &["OS", "get", "TotalVisibleMemorySize"])
                .and_then(|out| parse_wmic_total_memory_kib(&out))
                .and_then(|kib| bytes_to_gib(kib.saturating_mul(1024)))
        } else {
            None
        }
    })
}

/// Round to the nearest GiB; zero means "unknown".
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn bytes_to_gib(bytes: u64) -> Option<u64> {
    (bytes > 0).then(|| (bytes as f64 / BYTES_PER_GIB).round() as u64)
}

/// Parse `wmic OS get TotalVisibleMemorySize` (value in KiB).
pub fn parse_wmic_total_memory_kib(output: &str) -> Option<u64> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.contains("TotalVisibleMemorySize"))
        .and_then(|line| line.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_gib_rounds() {
        assert_eq!(bytes_to_gib(0), None);
        assert_eq!(bytes_to_gib(16 * 1024 * 1024 * 1024), Some(16));
        // 15.6 GiB as commonly reported for a 16 GB machine
        assert_eq!(bytes_to_gib(16_750_000_000), Some(16));
    }

    #[test]
    fn test_parse_wmic_memory() {
        let out = "TotalVisibleMemorySize  \r\n16651236  \r\n\r\n";
        assert_eq!(parse_wmic_total_memory_kib(out), Some(16_651_236));
        assert_eq!(parse_wmic_total_memory_kib("TotalVisibleMemorySize\n"), None);
    }
}
