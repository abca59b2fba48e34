pub mod config;
pub mod http_backend;
pub mod paths;
pub mod session_repository;
pub mod settings_repository;
pub mod storage;

pub use crate::config::ClientConfig;
pub use crate::http_backend::HttpRagBackend;
pub use crate::paths::RagdeskPaths;
pub use crate::session_repository::KvSessionRepository;
pub use crate::settings_repository::KvSettingsRepository;
pub use crate::storage::{JsonFileStore, MemoryStore};
