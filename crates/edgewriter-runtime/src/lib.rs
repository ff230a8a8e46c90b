//! Runtime adapters for EdgeWriter.
//!
//! - [`llama`]: the inference engine, driven as a `llama-server` child
//!   process over its HTTP API
//! - [`system`]: GPU and RAM probing through vendor tools and `sysinfo`
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod command;
mod health;
pub mod llama;
pub mod system;

pub use health::wait_for_http_health;
pub use llama::{EngineSettings, LlamaServerEngine, LlamaServerError, LlamaServerLoader};
pub use system::DefaultSystemProbe;

#[cfg(test)]
use tokio_test as _;
