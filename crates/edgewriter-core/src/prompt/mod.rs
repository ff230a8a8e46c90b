//! Prompt compilation.
//!
//! Turns structured requests into Phi-3 chat markup. This is pure string
//! construction with no engine access.
//!
//! Task prompts always have the same shape:
//!
//! ```text
//! <|user|>
//! <instruction body>
//! """<payload>"""<|end|>
//! <|assistant|>
//! ```
//!
//! The payload is the only caller-controlled span. Triple quotes and role
//! markers inside it are neutralized so it can neither close the data span
//! nor open a new turn.

pub mod templates;

use crate::domain::{CHAT_HISTORY_WINDOW, ChatMessage, GenerationRequest, Task, Tone};
use templates::{ASSISTANT_TAG, DATA_DELIMITER, END_TAG, SYSTEM_TAG, USER_TAG};

/// Builds prompt text for the generation pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptCompiler;

impl PromptCompiler {
    pub const fn new() -> Self {
        Self
    }

    /// Compile a task-mode request.
    pub fn compile_task(&self, req: &GenerationRequest) -> String {
        let instruction = match &req.task {
            Task::Summarize => templates::summarize(),
            Task::Proofread => templates::proofread(),
            Task::Paraphrase => templates::paraphrase(),
            Task::Rewrite => Self::rewrite_instruction(req),
            Task::Other(_) => templates::process_generic(),
        };

        let payload = neutralize(req.text.trim());
        format!(
            "{USER_TAG}\n{instruction}\n{DATA_DELIMITER}{payload}{DATA_DELIMITER}{END_TAG}\n{ASSISTANT_TAG}"
        )
    }

    fn rewrite_instruction(req: &GenerationRequest) -> String {
        if let Some(template) = templates::rewrite(&req.tone) {
            return template;
        }
        match (&req.tone, req.effective_custom_tone()) {
            (Tone::Custom, Some(label)) => templates::rewrite_custom(&neutralize(label)),
            (tone, _) => templates::rewrite_open(&neutralize(tone.as_str())),
        }
    }

    /// Compile a conversation.
    ///
    /// Only the last [`CHAT_HISTORY_WINDOW`] messages are kept, in their
    /// original order.
    pub fn compile_chat(&self, history: &[ChatMessage]) -> String {
        let skip = history.len().saturating_sub(CHAT_HISTORY_WINDOW);

        let mut parts = Vec::with_capacity(history.len() - skip + 2);
        parts.push(format!(
            "{SYSTEM_TAG}\n{}\n{END_TAG}",
            templates::CHAT_SYSTEM_PROMPT
        ));
        parts.extend(history[skip..].iter().map(|msg| {
            format!(
                "<|{}|>\n{}\n{END_TAG}",
                msg.role.as_str(),
                neutralize(msg.content.trim())
            )
        }));
        parts.push(ASSISTANT_TAG.to_string());

        parts.join("\n")
    }
}

/// Defuse delimiter and role-marker sequences in caller text.
///
/// `"""` becomes `'''` and every `<|` collapses to `<`, so no Phi-3 special
/// tag survives. Idempotent.
pub fn neutralize(text: &str) -> String {
    let mut out = text.replace(DATA_DELIMITER, "'''");
    while out.contains("<|") {
        out = out.replace("<|", "<");
    }
    out
}
