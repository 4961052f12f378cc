use serde::{Deserialize, Serialize};

/// A role-tagged chat message, as exchanged with the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// The messages of a single-turn request: the system context, then the user prompt.
///
/// No history is carried between calls.
pub fn single_turn(system_context: &str, user_prompt: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_context),
        ChatMessage::user(user_prompt),
    ]
}
