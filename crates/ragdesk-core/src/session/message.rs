//! Conversation message types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MessageRole {
    /// Message typed by the user.
    User,
    /// Reply produced by the generation service (or a local failure reply).
    Bot,
}

/// Where the backend says an answer's knowledge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceKind {
    /// Retrieved from the user's indexed documents.
    Local,
    /// Model knowledge without retrieval hits.
    General,
    /// Web search results.
    Network,
}

/// A single message in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    /// Citation strings, in the order the backend returned them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_kind: Option<SourceKind>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            sources: None,
            source_kind: None,
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Bot,
            content: content.into(),
            sources: None,
            source_kind: None,
        }
    }

    /// Attaches provenance to a bot message.
    pub fn with_provenance(mut self, sources: Vec<String>, kind: Option<SourceKind>) -> Self {
        self.sources = if sources.is_empty() { None } else { Some(sources) };
        self.source_kind = kind;
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}
