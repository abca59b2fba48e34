//! Storage adapters for the persisted key-value region.

pub mod atomic_json;
pub mod file_store;
pub mod memory_store;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;
