use edgewriter_core::{GenerationRequest, GenerationResult, TokenUsage};
use serde::{Deserialize, Serialize};

/// Body of `POST /generate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequestDto {
    pub task: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default, alias = "custom_tone")]
    pub custom_tone: Option<String>,
    pub text: String,
}

impl From<GenerateRequestDto> for GenerationRequest {
    fn from(dto: GenerateRequestDto) -> Self {
        Self::from_labels(&dto.task, dto.tone.as_deref(), dto.custom_tone, dto.text)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokensDto {
    pub prompt: u64,
    pub completion: u64,
    pub total: u64,
}

impl From<TokenUsage> for TokensDto {
    fn from(usage: TokenUsage) -> Self {
        Self {
            prompt: usage.prompt,
            completion: usage.completion,
            total: usage.total,
        }
    }
}

/// Response of both `/generate` and `/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponseDto {
    pub text: String,
    /// Seconds, rounded to hundredths.
    pub latency: f64,
    pub tokens: TokensDto,
    pub raw_output: String,
}

impl From<GenerationResult> for GenerationResponseDto {
    fn from(result: GenerationResult) -> Self {
        Self {
            latency: result.latency_rounded(),
            tokens: result.tokens.into(),
            text: result.text,
            raw_output: result.raw_output,
        }
    }
}
