//! Key-value store backed by one JSON file per key.

use super::atomic_json::AtomicJsonFile;
use async_trait::async_trait;
use ragdesk_core::error::{RagdeskError, Result};
use ragdesk_core::storage::KeyValueStore;
use std::path::{Path, PathBuf};

/// Stores each key as `<dir>/<key>.json`.
///
/// Keys are restricted to ASCII letters, digits, `-` and `_` so they map to
/// plain file names. File access runs on the blocking pool.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, key: &str) -> Result<AtomicJsonFile<serde_json::Value>> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RagdeskError::validation(format!("invalid storage key: {:?}", key)));
        }
        Ok(AtomicJsonFile::new(self.dir.join(format!("{}.json", key))))
    }
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| RagdeskError::internal(format!("storage task failed: {}", e)))?
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let file = self.file_for(key)?;
        blocking(move || Ok(file.load()?)).await
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        let file = self.file_for(key)?;
        let key = key.to_string();
        blocking(move || {
            file.replace(&value)?;
            tracing::debug!("[JsonFileStore] Wrote key: {}", key);
            Ok(())
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let file = self.file_for(key)?;
        blocking(move || Ok(file.remove()?)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_values_survive_a_new_handle() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path());
        store
            .set("currentSessionId", json!("abc"))
            .await
            .unwrap();

        let reopened = JsonFileStore::new(temp_dir.path());
        assert_eq!(
            reopened.get("currentSessionId").await.unwrap(),
            Some(json!("abc"))
        );
        assert!(temp_dir.path().join("currentSessionId.json").exists());
    }

    #[tokio::test]
    async fn test_absent_key_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("nested"));
        assert!(store.get("sessions").await.unwrap().is_none());

        store.set("sessions", json!({})).await.unwrap();
        store.remove("sessions").await.unwrap();
        assert!(store.get("sessions").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("settings.json"), "{broken").unwrap();
        let store = JsonFileStore::new(temp_dir.path());
        assert!(store.get("settings").await.unwrap_err().is_serialization());

        store.set("settings", json!({"topK": 4})).await.unwrap();
        assert_eq!(store.get("settings").await.unwrap(), Some(json!({"topK": 4})));
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path());
        let err = store.set("../escape", json!(1)).await.unwrap_err();
        assert!(err.is_validation());
    }
}
