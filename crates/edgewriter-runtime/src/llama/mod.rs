//! llama.cpp inference engine.
//!
//! The model is served by a `llama-server` child process bound to a private
//! loopback port. [`LlamaServerLoader`] spawns it and waits until the model
//! is resident; [`LlamaServerEngine`] then talks to its `/completion`
//! endpoint. Dropping the engine kills the child.

mod engine;
pub mod error;
mod settings;

pub use engine::{LlamaServerEngine, LlamaServerLoader};
pub use error::LlamaServerError;
pub use settings::EngineSettings;
