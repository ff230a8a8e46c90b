//! GPU detection.
//!
//! The parsers are pure functions over tool output so they can be tested on
//! any platform; only [`detect_gpus`] actually runs commands.

use edgewriter_core::{GpuDevice, GpuKind};

use super::commands::command_stdout;

/// Name fragments (uppercased) that identify integrated graphics.
const INTEGRATED_MARKERS: &[&str] = &["INTEL", "AMD RADEON(TM) GRAPHICS"];

/// Probe every source available on this platform, NVIDIA first.
pub fn detect_gpus() -> Vec<GpuDevice> {
    let mut gpus = command_stdout(
        "nvidia-smi",
        &["--query-gpu=name,memory.total", "--format=csv,noheader"],
    )
    .map(|out| parse_nvidia_smi(&out))
    .unwrap_or_default();

    if cfg!(target_os = "windows")
        && let Some(out) = command_stdout("wmic", &["path", "win32_VideoController", "get", "Name"])
    {
        merge_named(&mut gpus, parse_wmic_video_controllers(&out));
    }

    if cfg!(target_os = "linux")
        && let Some(out) = command_stdout("lspci", &[])
    {
        merge_named(&mut gpus, parse_lspci(&out));
    }

    gpus
}

/// Parse `nvidia-smi --query-gpu=name,memory.total --format=csv,noheader`.
pub fn parse_nvidia_smi(output: &str) -> Vec<GpuDevice> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut parts = line.split(',').map(str::trim);
            let name = parts.next().unwrap_or_default();
            let memory = parts
                .next()
                .filter(|m| !m.is_empty())
                .unwrap_or(GpuDevice::UNKNOWN_MEMORY);
            GpuDevice::new(name, GpuKind::Nvidia, memory)
        })
        .collect()
}

/// Parse `wmic path win32_VideoController get Name`.
pub fn parse_wmic_video_controllers(output: &str) -> Vec<GpuDevice> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains("Name"))
        .map(|name| GpuDevice::new(name, classify(name), GpuDevice::UNKNOWN_MEMORY))
        .collect()
}

/// Parse plain `lspci` output, keeping display controllers.
///
/// Lines look like
/// `01:00.0 VGA compatible controller: NVIDIA Corporation AD104 [GeForce RTX 4070] (rev a1)`.
pub fn parse_lspci(output: &str) -> Vec<GpuDevice> {
    output
        .lines()
        .filter_map(|line| {
            let (_, rest) = line.split_once(' ')?;
            let (class, name) = rest.split_once(": ")?;
            let is_display = class.starts_with("VGA compatible controller")
                || class.starts_with("3D controller")
                || class.starts_with("Display controller");
            is_display.then(|| {
                let name = strip_revision(name.trim());
                GpuDevice::new(name, classify(name), GpuDevice::UNKNOWN_MEMORY)
            })
        })
        .collect()
}

fn strip_revision(name: &str) -> &str {
    match name.rfind(" (rev ") {
        Some(idx) if name.ends_with(')') => &name[..idx],
        _ => name,
    }
}

/// Integrated vs dedicated, by name.
pub fn classify(name: &str) -> GpuKind {
    let upper = name.to_uppercase();
    if INTEGRATED_MARKERS.iter().any(|m| upper.contains(m)) {
        GpuKind::Integrated
    } else {
        GpuKind::Dedicated
    }
}

/// Append `found` to `gpus`, skipping names already listed.
///
/// Adapters seen through nvidia-smi also show up in the OS listing, possibly
/// under a vendor-formatted name; the nvidia-smi entry wins because it
/// carries memory.
fn merge_named(gpus: &mut Vec<GpuDevice>, found: Vec<GpuDevice>) {
    let has_nvidia = gpus.iter().any(|g| g.kind == GpuKind::Nvidia);
    for gpu in found {
        let seen = gpus.iter().any(|g| g.name == gpu.name)
            || (has_nvidia && gpu.name.to_uppercase().contains("NVIDIA"));
        if !seen {
            gpus.push(gpu);
        }
    }
}
