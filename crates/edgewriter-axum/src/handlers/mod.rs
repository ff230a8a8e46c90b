//! HTTP handlers, one module per resource.
//!
//! Handlers are thin: they decode the request, call into the core, and map
//! the outcome to a response.

pub mod chat;
pub mod generate;
pub mod health;
pub mod system;
pub mod weights;
