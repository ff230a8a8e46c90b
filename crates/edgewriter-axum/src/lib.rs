//! Axum HTTP adapter for EdgeWriter.
//!
//! Routes:
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/health` | status and whether the model is loaded, never loads it |
//! | GET | `/api/gpu-info`, `/gpu-info` | best-effort GPU list and RAM |
//! | POST | `/generate` | task-mode editing |
//! | POST | `/chat` | conversation |
//! | GET | `/weights-asset`, `/weights.bin` | weights file with `Range` support |
//!
//! With a static directory configured, everything else falls through to the
//! web UI with `index.html` as the SPA fallback.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod range_server;
pub mod routes;
pub mod state;

pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use range_server::{RangeServeError, serve_file};
pub use routes::{create_router, create_spa_router};
pub use state::AppState;
