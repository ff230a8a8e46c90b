//! EdgeWriter command-line interface.
//!
//! The binary in `main.rs` parses arguments, initialises logging and hands
//! off to [`handlers`]. Everything that can be tested without a terminal
//! lives in this library.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary target only
use anyhow as _;
use dotenvy as _;
use tracing_subscriber as _;

#[cfg(test)]
use tempfile as _;

pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

pub use commands::{Commands, ServerArgs};
pub use error::CliError;
pub use parser::Cli;
