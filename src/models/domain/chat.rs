use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn label(&self) -> &'static str {
        match self {
            ChatRole::User => "Student",
            ChatRole::Assistant => "Assistant",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: &str) -> Self {
        ChatMessage {
            role,
            content: content.to_string(),
            sent_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatSession {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub document_id: Option<String>,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl ChatSession {
    pub fn new(user_id: &str, title: &str, document_id: Option<String>) -> Self {
        ChatSession {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            document_id,
            messages: Vec::new(),
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.modified_at = Some(message.sent_at);
        self.messages.push(message);
    }

    /// The most recent `limit` messages, oldest first.
    pub fn recent(&self, limit: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(limit);
        &self.messages[start..]
    }
}
