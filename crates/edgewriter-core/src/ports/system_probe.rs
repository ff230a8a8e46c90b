//! System probe port for GPU and memory detection.
//!
//! Core owns the trait and types; the runtime crate owns the implementation
//! that shells out to vendor tools. Probing never fails: anything that cannot
//! be detected is simply left out of the report.

use serde::{Deserialize, Serialize};

/// Coarse GPU classification shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GpuKind {
    #[serde(rename = "NVIDIA")]
    Nvidia,
    Integrated,
    Dedicated,
    Unknown,
}

/// A detected graphics adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuDevice {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: GpuKind,
    /// Memory as reported by the vendor tool, or `"Unknown"`.
    pub memory: String,
}

impl GpuDevice {
    pub const UNKNOWN_MEMORY: &'static str = "Unknown";

    pub fn new(name: impl Into<String>, kind: GpuKind, memory: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            memory: memory.into(),
        }
    }
}

/// Hardware summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub gpus: Vec<GpuDevice>,
    /// Total physical memory rounded to whole GiB, if known.
    #[serde(rename = "ramGB")]
    pub ram_gb: Option<u64>,
}

/// Port for probing local hardware.
pub trait SystemProbePort: Send + Sync {
    fn detect_gpus(&self) -> Vec<GpuDevice>;

    fn total_ram_gb(&self) -> Option<u64>;

    /// Combined report.
    fn system_info(&self) -> SystemInfo {
        SystemInfo {
            gpus: self.detect_gpus(),
            ram_gb: self.total_ram_gb(),
        }
    }
}
