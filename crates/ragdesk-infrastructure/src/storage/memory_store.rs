//! In-process key-value store.

use async_trait::async_trait;
use ragdesk_core::error::Result;
use ragdesk_core::storage::KeyValueStore;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Keeps every value in memory; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("settings").await.unwrap().is_none());

        store.set("settings", json!({"topK": 3})).await.unwrap();
        assert_eq!(store.get("settings").await.unwrap(), Some(json!({"topK": 3})));

        store.remove("settings").await.unwrap();
        store.remove("settings").await.unwrap();
        assert!(store.get("settings").await.unwrap().is_none());
    }
}
