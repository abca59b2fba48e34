use super::message::Message;
use super::model::ChatSession;
use super::repository::SessionRepository;
use crate::error::{RagdeskError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Mirror {
    sessions: HashMap<String, ChatSession>,
    current_id: Option<String>,
}

/// Manages chat sessions and the active-session pointer.
///
/// `ChatSessionStore` keeps an in-memory mirror that is the authoritative
/// view while the process runs. Every mutation takes the mirror's write
/// lock, persists the full modified session through the repository and only
/// then applies it to the mirror, so a failed write leaves both unchanged.
///
/// Another process writing the same storage is not coordinated with; the
/// last write wins.
pub struct ChatSessionStore {
    repository: Arc<dyn SessionRepository>,
    mirror: RwLock<Mirror>,
}

impl ChatSessionStore {
    /// Creates an empty store. Use [`ChatSessionStore::load`] to restore
    /// persisted sessions.
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            repository,
            mirror: RwLock::new(Mirror::default()),
        }
    }

    /// Restores all sessions and the current pointer from storage.
    ///
    /// A pointer to a session that no longer exists is dropped.
    pub async fn load(repository: Arc<dyn SessionRepository>) -> Result<Self> {
        let sessions = repository.list_all().await?;
        let mut current_id = repository.get_current_session_id().await?;

        let sessions: HashMap<String, ChatSession> =
            sessions.into_iter().map(|s| (s.id.clone(), s)).collect();

        if let Some(id) = current_id.as_deref() {
            if !sessions.contains_key(id) {
                tracing::warn!("[ChatSessionStore] Dropping dangling current session: {}", id);
                repository.set_current_session_id(None).await?;
                current_id = None;
            }
        }

        tracing::info!("[ChatSessionStore] Loaded {} sessions", sessions.len());
        Ok(Self {
            repository,
            mirror: RwLock::new(Mirror {
                sessions,
                current_id,
            }),
        })
    }

    /// Returns all sessions, most recently updated first.
    pub async fn list_sessions(&self) -> Vec<ChatSession> {
        let mirror = self.mirror.read().await;
        let mut sessions: Vec<ChatSession> = mirror.sessions.values().cloned().collect();
        sessions.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        sessions
    }

    pub async fn get(&self, session_id: &str) -> Option<ChatSession> {
        self.mirror.read().await.sessions.get(session_id).cloned()
    }

    pub async fn current_session_id(&self) -> Option<String> {
        self.mirror.read().await.current_id.clone()
    }

    /// Messages of the active session; empty when none is active.
    pub async fn active_messages(&self) -> Vec<Message> {
        let mirror = self.mirror.read().await;
        mirror
            .current_id
            .as_ref()
            .and_then(|id| mirror.sessions.get(id))
            .map(|s| s.messages.clone())
            .unwrap_or_default()
    }

    /// Creates an empty session, persists it and makes it active.
    ///
    /// If the pointer cannot be written the session still exists, but the
    /// previously active session stays active.
    pub async fn new_session(&self) -> Result<ChatSession> {
        let mut mirror = self.mirror.write().await;
        let session = ChatSession::new();

        self.repository.save(&session).await?;
        mirror.sessions.insert(session.id.clone(), session.clone());

        self.repository
            .set_current_session_id(Some(&session.id))
            .await?;
        mirror.current_id = Some(session.id.clone());

        tracing::info!("[ChatSessionStore] Created session: {}", session.id);
        Ok(session)
    }

    /// Returns the active session id, creating a session when none is active.
    pub async fn ensure_active(&self) -> Result<String> {
        if let Some(id) = self.current_session_id().await {
            return Ok(id);
        }
        Ok(self.new_session().await?.id)
    }

    /// Makes `session_id` active and returns its messages.
    pub async fn select(&self, session_id: &str) -> Result<Vec<Message>> {
        let mut mirror = self.mirror.write().await;
        let messages = mirror
            .sessions
            .get(session_id)
            .map(|s| s.messages.clone())
            .ok_or_else(|| RagdeskError::not_found("Session", session_id))?;

        self.repository
            .set_current_session_id(Some(session_id))
            .await?;
        mirror.current_id = Some(session_id.to_string());

        tracing::debug!("[ChatSessionStore] Selected session: {}", session_id);
        Ok(messages)
    }

    /// Appends `message` to the session and persists the whole session.
    ///
    /// The first user message derives the title from its text.
    pub async fn append_message(&self, session_id: &str, message: Message) -> Result<ChatSession> {
        self.mutate(session_id, |session| session.push(message))
            .await
    }

    /// Overwrites the title; `None` or blank input restores the placeholder.
    pub async fn rename(&self, session_id: &str, title: Option<&str>) -> Result<ChatSession> {
        let updated = self
            .mutate(session_id, |session| session.rename(title))
            .await?;
        tracing::info!(
            "[ChatSessionStore] Renamed session {} to {}",
            session_id,
            updated.title
        );
        Ok(updated)
    }

    /// Deletes the session. Deleting the active session clears the pointer.
    ///
    /// The pointer is cleared first so it never names a deleted session.
    pub async fn delete(&self, session_id: &str) -> Result<()> {
        let mut mirror = self.mirror.write().await;
        if !mirror.sessions.contains_key(session_id) {
            return Err(RagdeskError::not_found("Session", session_id));
        }

        let was_active = mirror.current_id.as_deref() == Some(session_id);
        if was_active {
            self.repository.set_current_session_id(None).await?;
            mirror.current_id = None;
        }
        self.repository.delete(session_id).await?;
        mirror.sessions.remove(session_id);

        tracing::info!(
            "[ChatSessionStore] Deleted session: {} (active: {})",
            session_id,
            was_active
        );
        Ok(())
    }

    /// Load-full-state, modify, store-full-state under the write lock.
    async fn mutate<F>(&self, session_id: &str, f: F) -> Result<ChatSession>
    where
        F: FnOnce(&mut ChatSession),
    {
        let mut mirror = self.mirror.write().await;
        let mut session = mirror
            .sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| RagdeskError::not_found("Session", session_id))?;

        f(&mut session);
        self.repository.save(&session).await?;
        mirror.sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }
}
