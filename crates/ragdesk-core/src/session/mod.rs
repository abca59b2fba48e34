//! Chat session domain module.
//!
//! # Module Structure
//!
//! - `message`: conversation message types (`MessageRole`, `Message`, `SourceKind`)
//! - `model`: the persisted `ChatSession` and its title rules
//! - `repository`: persistence port for sessions and the current-session pointer
//! - `store`: `ChatSessionStore`, the in-memory mirror kept in lockstep with storage

mod message;
mod model;
mod repository;
mod store;

pub use message::{Message, MessageRole, SourceKind};
pub use model::{ChatSession, PLACEHOLDER_TITLE, TITLE_MAX_CHARS, TRUNCATION_MARKER, derive_title};
pub use repository::SessionRepository;
pub use store::ChatSessionStore;
