//! Task-mode editing requests.
//!
//! The HTTP surface sends `task` and `tone` as free strings. They are parsed
//! into closed enums here, each with an explicit fallback arm so that unknown
//! values degrade to a generic template instead of being rejected.

use std::fmt;

/// The editing operation requested by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Summarize,
    Proofread,
    Paraphrase,
    Rewrite,
    /// Any unrecognized task label, kept verbatim for logging.
    Other(String),
}

impl Task {
    /// Parse a task label. Matching is exact after trimming, like the
    /// labels the web UI sends.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Summarize" => Self::Summarize,
            "Proofread" => Self::Proofread,
            "Paraphrase" => Self::Paraphrase,
            "Rewrite" => Self::Rewrite,
            other => Self::Other(other.to_string()),
        }
    }

    /// Label used in logs and responses.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Summarize => "Summarize",
            Self::Proofread => "Proofread",
            Self::Paraphrase => "Paraphrase",
            Self::Rewrite => "Rewrite",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Style modifier for [`Task::Rewrite`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Neutral,
    Professional,
    Friendly,
    Concise,
    Academic,
    /// The client asked for a free-form tone carried in `customTone`.
    Custom,
    /// Unrecognized tone label, embedded verbatim into the open template.
    Other(String),
}

impl Tone {
    pub const DEFAULT_LABEL: &'static str = "Neutral";

    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Neutral" => Self::Neutral,
            "Professional" => Self::Professional,
            "Friendly" => Self::Friendly,
            "Concise" => Self::Concise,
            "Academic" => Self::Academic,
            "Custom" => Self::Custom,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Neutral => "Neutral",
            Self::Professional => "Professional",
            Self::Friendly => "Friendly",
            Self::Concise => "Concise",
            Self::Academic => "Academic",
            Self::Custom => "Custom",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task-mode generation request.
///
/// `text` is opaque user data. It is never interpreted as instructions by
/// the prompt compiler, whatever it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub task: Task,
    pub tone: Tone,
    /// Free-form tone label, only consulted when `tone` is [`Tone::Custom`].
    pub custom_tone: Option<String>,
    pub text: String,
}

impl GenerationRequest {
    /// Build a request from the raw wire strings.
    pub fn from_labels(
        task: &str,
        tone: Option<&str>,
        custom_tone: Option<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            task: Task::parse(task),
            tone: tone.map_or_else(Tone::default, Tone::parse),
            custom_tone,
            text: text.into(),
        }
    }

    /// The custom tone label if it is usable (present and non-blank).
    #[must_use]
    pub fn effective_custom_tone(&self) -> Option<&str> {
        self.custom_tone
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
