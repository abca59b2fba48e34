//! Persisted key-value region.

use crate::error::Result;
use async_trait::async_trait;

/// Key holding the map of session id to session.
pub const SESSIONS_KEY: &str = "sessions";

/// Key holding the nullable current-session id.
pub const CURRENT_SESSION_KEY: &str = "currentSessionId";

/// Key holding the user settings object.
pub const SETTINGS_KEY: &str = "settings";

/// Whole-value storage addressed by string keys.
///
/// Values are replaced wholesale; callers do their own load-modify-store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;

    /// Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
