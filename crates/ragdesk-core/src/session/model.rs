//! Chat session model.

use super::message::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to a session before its first user turn.
pub const PLACEHOLDER_TITLE: &str = "新对话";

/// Number of characters of the first user message kept in a derived title.
pub const TITLE_MAX_CHARS: usize = 15;

/// Appended to a derived title that was cut short.
pub const TRUNCATION_MARKER: &str = "...";

/// One persisted multi-turn conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    /// Opaque identifier (UUID v4)
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    /// Last mutation time; drives most-recent-first ordering
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl ChatSession {
    /// Creates an empty session with a fresh id and the placeholder title.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: PLACEHOLDER_TITLE.to_string(),
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
        }
    }

    /// Appends `message`, deriving the title from the first user turn.
    pub fn push(&mut self, message: Message) {
        let first_user_turn = message.is_user() && !self.messages.iter().any(Message::is_user);
        if first_user_turn && self.title == PLACEHOLDER_TITLE {
            self.title = derive_title(&message.content);
        }
        self.messages.push(message);
        self.touch();
    }

    /// Overwrites the title; empty or cancelled input restores the placeholder.
    pub fn rename(&mut self, title: Option<&str>) {
        self.title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(PLACEHOLDER_TITLE)
            .to_string();
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// First `TITLE_MAX_CHARS` characters of `text`, plus the truncation
/// marker when anything was cut.
pub fn derive_title(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{}{}", head, TRUNCATION_MARKER)
    } else {
        head
    }
}
