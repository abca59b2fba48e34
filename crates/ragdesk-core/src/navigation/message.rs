use crate::state::Page;
use serde::{Deserialize, Serialize};

/// The only message shape an embedded page may send to the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NavigationMessage {
    Navigate { page: String },
}

impl NavigationMessage {
    /// Parses a raw payload; any other shape yields `None`.
    pub fn parse(payload: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(payload.clone()).ok()
    }

    /// Target page, if the name is a known page.
    pub fn target(&self) -> Option<Page> {
        match self {
            NavigationMessage::Navigate { page } => page.parse().ok(),
        }
    }
}

/// A message as delivered by the channel, before any checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub origin: String,
    pub payload: serde_json::Value,
}

impl InboundMessage {
    pub fn new(origin: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            origin: origin.into(),
            payload,
        }
    }

    /// A well-formed navigate request.
    pub fn navigate(origin: impl Into<String>, page: Page) -> Self {
        Self::new(
            origin,
            serde_json::json!({ "kind": "navigate", "page": page.as_ref() }),
        )
    }
}
