//! Domain layer of the RagDesk client.
//!
//! Holds the models, invariants and ports shared by the other crates:
//! the retrieval-method catalog, the file registry mirror, chat sessions,
//! settings, shell navigation and the backend/storage traits.

pub mod backend;
pub mod catalog;
pub mod error;
pub mod file;
pub mod navigation;
pub mod notice;
pub mod session;
pub mod settings;
pub mod state;
pub mod storage;

pub use error::{RagdeskError, Result};
