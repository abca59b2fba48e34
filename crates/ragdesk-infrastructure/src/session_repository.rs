//! Session repository over the key-value region.

use async_trait::async_trait;
use ragdesk_core::error::Result;
use ragdesk_core::session::{ChatSession, SessionRepository};
use ragdesk_core::storage::{CURRENT_SESSION_KEY, KeyValueStore, SESSIONS_KEY};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

type SessionMap = BTreeMap<String, ChatSession>;

/// Stores all sessions as one map under `sessions` and the pointer under
/// `currentSessionId`.
///
/// Each write loads the whole map, changes one entry and stores the map
/// back. Writers in this process are serialized; writers in another
/// process sharing the same storage are not (last write wins).
pub struct KvSessionRepository {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl KvSessionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    async fn load_map(&self) -> Result<SessionMap> {
        match self.store.get(SESSIONS_KEY).await? {
            Some(serde_json::Value::Null) | None => Ok(SessionMap::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    async fn store_map(&self, map: &SessionMap) -> Result<()> {
        self.store
            .set(SESSIONS_KEY, serde_json::to_value(map)?)
            .await
    }
}

#[async_trait]
impl SessionRepository for KvSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<ChatSession>> {
        Ok(self.load_map().await?.remove(session_id))
    }

    async fn save(&self, session: &ChatSession) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load_map().await?;
        map.insert(session.id.clone(), session.clone());
        self.store_map(&map).await
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load_map().await?;
        if map.remove(session_id).is_some() {
            self.store_map(&map).await?;
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ChatSession>> {
        Ok(self.load_map().await?.into_values().collect())
    }

    async fn get_current_session_id(&self) -> Result<Option<String>> {
        match self.store.get(CURRENT_SESSION_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(None),
        }
    }

    async fn set_current_session_id(&self, session_id: Option<&str>) -> Result<()> {
        match session_id {
            Some(id) => {
                self.store
                    .set(CURRENT_SESSION_KEY, serde_json::Value::String(id.to_string()))
                    .await
            }
            None => self.store.remove(CURRENT_SESSION_KEY).await,
        }
    }
}
