//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use super::model::ChatSession;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for managing session persistence.
///
/// Implementations persist whole sessions; there is no partial update.
/// Storage shared between processes is last-write-wins.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds a session by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ChatSession))`: Session found
    /// - `Ok(None)`: Session not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, session_id: &str) -> Result<Option<ChatSession>>;

    /// Saves the full session object, replacing any stored copy.
    async fn save(&self, session: &ChatSession) -> Result<()>;

    /// Deletes a session from storage.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Session deleted successfully (or didn't exist)
    /// - `Err(_)`: Error occurred during deletion
    async fn delete(&self, session_id: &str) -> Result<()>;

    /// Lists all stored sessions.
    async fn list_all(&self) -> Result<Vec<ChatSession>>;

    /// Gets the persisted "current session" pointer.
    async fn get_current_session_id(&self) -> Result<Option<String>>;

    /// Sets or clears the persisted "current session" pointer.
    async fn set_current_session_id(&self, session_id: Option<&str>) -> Result<()>;
}
