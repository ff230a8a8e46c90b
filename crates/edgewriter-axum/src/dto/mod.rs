//! Wire types for the HTTP API.
//!
//! Field names follow what the browser UI sends and reads (camelCase).

mod chat;
mod generate;
mod health;

pub use chat::{ChatMessageDto, ChatRequestDto};
pub use generate::{GenerateRequestDto, GenerationResponseDto, TokensDto};
pub use health::HealthResponse;
