use edgewriter_core::{ChatMessage, ChatRole};
use serde::Deserialize;

/// One history entry as sent by the UI. `role` is free text.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessageDto {
    #[serde(default)]
    pub role: String,
    pub content: String,
}

impl From<ChatMessageDto> for ChatMessage {
    fn from(dto: ChatMessageDto) -> Self {
        Self::new(ChatRole::parse_lenient(&dto.role), dto.content)
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequestDto {
    pub messages: Vec<ChatMessageDto>,
}

impl ChatRequestDto {
    pub fn into_history(self) -> Vec<ChatMessage> {
        self.messages.into_iter().map(ChatMessage::from).collect()
    }
}
