use super::model::Settings;
use super::repository::SettingsRepository;
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Load-modify-store access to the persisted [`Settings`].
pub struct SettingsStore {
    repository: Arc<dyn SettingsRepository>,
    lock: Mutex<()>,
}

impl SettingsStore {
    pub fn new(repository: Arc<dyn SettingsRepository>) -> Self {
        Self {
            repository,
            lock: Mutex::new(()),
        }
    }

    /// Stored settings, or defaults when none were saved.
    pub async fn load(&self) -> Result<Settings> {
        Ok(self.repository.load().await?.unwrap_or_default())
    }

    /// Applies `f` to the current settings, validates and stores the result.
    ///
    /// Nothing is written when `f` or validation fails.
    pub async fn update<F>(&self, f: F) -> Result<Settings>
    where
        F: FnOnce(&mut Settings) -> Result<()>,
    {
        let _guard = self.lock.lock().await;
        let mut settings = self.load().await?;
        f(&mut settings)?;
        settings.validate()?;
        self.repository.save(&settings).await?;
        tracing::info!("[SettingsStore] Settings updated");
        Ok(settings)
    }

    /// Drops stored settings; subsequent loads return defaults.
    pub async fn reset(&self) -> Result<Settings> {
        let _guard = self.lock.lock().await;
        self.repository.clear().await?;
        tracing::info!("[SettingsStore] Settings reset to defaults");
        Ok(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct MockSettingsRepository {
        stored: StdMutex<Option<Settings>>,
    }

    #[async_trait]
    impl SettingsRepository for MockSettingsRepository {
        async fn load(&self) -> Result<Option<Settings>> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save(&self, settings: &Settings) -> Result<()> {
            *self.stored.lock().unwrap() = Some(settings.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            *self.stored.lock().unwrap() = None;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_load_defaults_when_empty() {
        let store = SettingsStore::new(Arc::new(MockSettingsRepository::default()));
        assert_eq!(store.load().await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn test_update_persists_valid_change() {
        let repo = Arc::new(MockSettingsRepository::default());
        let store = SettingsStore::new(repo.clone());

        store
            .update(|s| s.set_field("chunk_size", "1000"))
            .await
            .unwrap();
        assert_eq!(repo.load().await.unwrap().unwrap().chunk_size, 1000);
    }

    #[tokio::test]
    async fn test_invalid_update_is_not_written() {
        let repo = Arc::new(MockSettingsRepository::default());
        let store = SettingsStore::new(repo.clone());

        let err = store
            .update(|s| {
                s.chunk_overlap = 600;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reset_clears_storage() {
        let repo = Arc::new(MockSettingsRepository::default());
        let store = SettingsStore::new(repo.clone());
        store.update(|s| s.set_field("theme", "dark")).await.unwrap();

        store.reset().await.unwrap();
        assert!(repo.load().await.unwrap().is_none());
    }
}
