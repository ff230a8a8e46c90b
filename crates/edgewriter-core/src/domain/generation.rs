//! Generation results and fixed decoding presets.
//!
//! Decoding parameters are chosen per call site (task mode vs chat mode) and
//! are never taken from request input.

use serde::{Deserialize, Serialize};

/// Role-switch tags that end a turn in the Phi-3 chat markup.
pub const STOP_MARKERS: &[&str] = &["<|end|>", "<|user|>", "<|assistant|>"];

/// Stop markers plus artifacts that leak into task-mode output: runs of blank
/// lines and echoed template preambles.
pub const TASK_TRUNCATION_MARKERS: &[&str] = &[
    "<|end|>",
    "<|user|>",
    "<|assistant|>",
    "\n\n\n",
    "Summary:\n\n",
];

/// Token counters reported by the engine. Missing counters are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt: u64,
    pub completion: u64,
    pub total: u64,
}

/// Sampling parameters and output cleanup rules for one call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodingPreset {
    /// Short name used in logs.
    pub name: &'static str,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub repeat_penalty: f32,
    /// Passed to the engine as stop sequences.
    pub stop: &'static [&'static str],
    /// Substrings at which the sanitizer cuts the output, in order.
    pub truncate_at: &'static [&'static str],
}

impl DecodingPreset {
    /// Editing tasks: low temperature for deterministic edits.
    pub const TASK: Self = Self {
        name: "task",
        max_tokens: 2048,
        temperature: 0.35,
        top_p: 0.90,
        repeat_penalty: 1.1,
        stop: STOP_MARKERS,
        truncate_at: TASK_TRUNCATION_MARKERS,
    };

    /// Free conversation.
    pub const CHAT: Self = Self {
        name: "chat",
        max_tokens: 2048,
        temperature: 0.5,
        top_p: 0.9,
        repeat_penalty: 1.05,
        stop: STOP_MARKERS,
        truncate_at: STOP_MARKERS,
    };
}

/// Outcome of a single inference call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    /// Sanitized output.
    pub text: String,
    /// Wall-clock duration of the inference call in seconds.
    pub latency_seconds: f64,
    pub tokens: TokenUsage,
    /// Engine output before sanitization, for diagnostics.
    pub raw_output: String,
}

impl GenerationResult {
    /// Latency rounded to hundredths of a second, as shown to users.
    #[must_use]
    pub fn latency_rounded(&self) -> f64 {
        (self.latency_seconds * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ_per_call_site() {
        assert!(DecodingPreset::TASK.temperature < DecodingPreset::CHAT.temperature);
        assert_eq!(DecodingPreset::TASK.stop, DecodingPreset::CHAT.stop);
        assert!(DecodingPreset::TASK.truncate_at.contains(&"\n\n\n"));
        assert!(!DecodingPreset::CHAT.truncate_at.contains(&"\n\n\n"));
    }

    #[test]
    fn test_latency_rounding() {
        let result = GenerationResult {
            text: String::new(),
            latency_seconds: 1.23456,
            tokens: TokenUsage::default(),
            raw_output: String::new(),
        };
        assert!((result.latency_rounded() - 1.23).abs() < f64::EPSILON);
    }
}
