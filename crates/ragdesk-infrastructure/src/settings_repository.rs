//! Settings repository over the key-value region.

use async_trait::async_trait;
use ragdesk_core::error::Result;
use ragdesk_core::settings::{Settings, SettingsRepository};
use ragdesk_core::storage::{KeyValueStore, SETTINGS_KEY};
use std::sync::Arc;

pub struct KvSettingsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvSettingsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SettingsRepository for KvSettingsRepository {
    async fn load(&self) -> Result<Option<Settings>> {
        match self.store.get(SETTINGS_KEY).await? {
            Some(serde_json::Value::Null) | None => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        self.store
            .set(SETTINGS_KEY, serde_json::to_value(settings)?)
            .await
    }

    async fn clear(&self) -> Result<()> {
        self.store.remove(SETTINGS_KEY).await
    }
}
