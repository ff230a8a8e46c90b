//! Domain types for EdgeWriter.
//!
//! These types describe requests, results and byte ranges independent of
//! any transport or engine implementation.

pub mod chat;
pub mod generation;
pub mod range;
pub mod task;

pub use chat::{CHAT_HISTORY_WINDOW, ChatMessage, ChatRole};
pub use generation::{
    DecodingPreset, GenerationResult, STOP_MARKERS, TASK_TRUNCATION_MARKERS, TokenUsage,
};
pub use range::{ByteRange, RangeError, RangeSpec, unsatisfied_content_range};
pub use task::{GenerationRequest, Task, Tone};
