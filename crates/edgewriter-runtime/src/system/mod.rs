//! System probe implementation.
//!
//! [`DefaultSystemProbe`] implements `SystemProbePort` from edgewriter-core
//! by shelling out to vendor tools. Everything here is best-effort: a
//! failed probe yields an empty list or `None`, never an error.

mod commands;
pub mod gpu;
pub mod memory;

use edgewriter_core::{GpuDevice, SystemProbePort};

/// Default implementation of `SystemProbePort`.
///
/// Probing runs blocking commands; async callers should move it off the
/// runtime threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSystemProbe;

impl DefaultSystemProbe {
    pub const fn new() -> Self {
        Self
    }
}

impl SystemProbePort for DefaultSystemProbe {
    fn detect_gpus(&self) -> Vec<GpuDevice> {
        gpu::detect_gpus()
    }

    fn total_ram_gb(&self) -> Option<u64> {
        memory::total_ram_gb()
    }
}
