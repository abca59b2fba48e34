use super::model::Settings;
use crate::error::Result;
use async_trait::async_trait;

/// Persistence port for [`Settings`].
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<Settings>>;

    async fn save(&self, settings: &Settings) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}
