use serde::{Deserialize, Serialize};

/// Who a transcript entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    System,
    Error,
    /// Transient placeholder while the reply is pending
    Loading,
}

impl ChatRole {
    pub fn css_modifier(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::System => "system",
            ChatRole::Error => "error",
            ChatRole::Loading => "loading",
        }
    }
}

/// Entry of the chat transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Stable key for list rendering
    pub id: u64,
    pub role: ChatRole,
    /// Partial while the reply is streaming
    pub content: String,
    /// True only for system replies
    pub rendered_as_markdown: bool,
    /// Last rendering of `content`, for system replies
    #[serde(skip)]
    pub html: Option<String>,
}

impl ChatMessage {
    pub fn new(id: u64, role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            rendered_as_markdown: role == ChatRole::System,
            html: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.role == ChatRole::Loading
    }
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub consulta: String,
    pub thread_id: String,
}

impl ChatRequest {
    pub fn new(consulta: impl Into<String>, thread_id: impl Into<String>) -> Self {
        Self {
            consulta: consulta.into(),
            thread_id: thread_id.into(),
        }
    }
}

/// Client-side conversation identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    pub thread_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_system_messages_render_markdown() {
        assert!(ChatMessage::new(1, ChatRole::System, "**hola**").rendered_as_markdown);
        assert!(!ChatMessage::new(2, ChatRole::User, "**hola**").rendered_as_markdown);
        assert!(!ChatMessage::new(3, ChatRole::Error, "fallo").rendered_as_markdown);
        assert!(ChatMessage::new(4, ChatRole::Loading, "").is_loading());
    }

    #[test]
    fn test_chat_request_wire_format() {
        let body = serde_json::to_value(ChatRequest::new("¿Ayudas?", "t-1")).unwrap();
        assert_eq!(body, serde_json::json!({"consulta": "¿Ayudas?", "thread_id": "t-1"}));
    }
}
