//! Wires the components of one page context from explicit dependencies.

use crate::chat_pipeline::{ChatPipelineClient, SendOutcome};
use crate::confirm::Confirmation;
use crate::index_coordinator::IndexCoordinator;
use ragdesk_core::backend::RagBackend;
use ragdesk_core::catalog::{RagMethod, RagMethodCatalog};
use ragdesk_core::error::Result;
use ragdesk_core::file::FileRegistry;
use ragdesk_core::navigation::{NavigationShell, PageHost};
use ragdesk_core::notice::NoticeBoard;
use ragdesk_core::session::ChatSessionStore;
use ragdesk_core::settings::{Settings, SettingsStore};
use ragdesk_core::storage::KeyValueStore;
use ragdesk_infrastructure::{
    ClientConfig, HttpRagBackend, JsonFileStore, KvSessionRepository, KvSettingsRepository,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Origin the navigation shell accepts page messages from.
pub const APP_ORIGIN: &str = "app://ragdesk";

/// Every component of the client, sharing one backend, one notice board
/// and one persisted store.
pub struct RagdeskApp {
    pub notices: Arc<NoticeBoard>,
    pub registry: Arc<FileRegistry>,
    pub index: IndexCoordinator,
    pub sessions: Arc<ChatSessionStore>,
    pub chat: ChatPipelineClient,
    pub settings: SettingsStore,
    catalog: RwLock<RagMethodCatalog>,
}

impl RagdeskApp {
    /// Loads persisted sessions and settings and builds the components.
    ///
    /// The file registry starts empty; call `registry.refresh()` to fetch it.
    pub async fn bootstrap(
        backend: Arc<dyn RagBackend>,
        store: Arc<dyn KeyValueStore>,
        confirmation: Arc<dyn Confirmation>,
    ) -> Result<Self> {
        let notices = Arc::new(NoticeBoard::new());

        let settings = SettingsStore::new(Arc::new(KvSettingsRepository::new(store.clone())));
        let default_method = match settings.load().await {
            Ok(loaded) => loaded.default_method,
            Err(e) => {
                // Left in place until the next update or reset overwrites it.
                tracing::warn!("[RagdeskApp] Stored settings unreadable: {}", e);
                notices.warning(format!("设置读取失败，已使用默认设置: {}", e));
                Settings::default().default_method
            }
        };

        let sessions = Arc::new(
            ChatSessionStore::load(Arc::new(KvSessionRepository::new(store))).await?,
        );
        let registry = Arc::new(FileRegistry::new(backend.clone(), notices.clone()));
        let index = IndexCoordinator::new(
            backend.clone(),
            registry.clone(),
            notices.clone(),
            confirmation,
        );
        let chat = ChatPipelineClient::new(backend, sessions.clone(), notices.clone());

        tracing::info!(
            "[RagdeskApp] Bootstrapped (default method: {})",
            default_method
        );
        Ok(Self {
            notices,
            registry,
            index,
            sessions,
            chat,
            settings,
            catalog: RwLock::new(RagMethodCatalog::with_selected(default_method)),
        })
    }

    /// Bootstraps against the HTTP backend and the on-disk state directory
    /// named by `config`.
    pub async fn from_config(
        config: &ClientConfig,
        confirmation: Arc<dyn Confirmation>,
    ) -> Result<Self> {
        let backend = Arc::new(HttpRagBackend::new(&config.base_url)?);
        let store = Arc::new(JsonFileStore::new(config.state_dir()?));
        tracing::debug!(
            "[RagdeskApp] Backend {}, state in {:?}",
            backend.base_url(),
            store.dir()
        );
        Self::bootstrap(backend, store, confirmation).await
    }

    /// Shell trusting [`APP_ORIGIN`] that loads pages into `host`.
    pub fn navigation_shell(host: Box<dyn PageHost>) -> NavigationShell {
        NavigationShell::new(APP_ORIGIN, host)
    }

    pub async fn catalog(&self) -> RagMethodCatalog {
        self.catalog.read().await.clone()
    }

    /// Selects the method used for subsequent chat turns.
    pub async fn select_method(&self, id: &str) -> Result<RagMethod> {
        let mut catalog = self.catalog.write().await;
        catalog.select(id)?;
        Ok(catalog.selected())
    }

    pub async fn toggle_method_expand(&self, id: &str) -> Result<()> {
        self.catalog.write().await.toggle_expand(id)
    }

    /// Sends `text` to the active session with the selected method.
    pub async fn send(&self, text: &str, polish: bool) -> Result<SendOutcome> {
        let method = self.catalog.read().await.selected();
        self.chat.send(None, text, method, polish).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::AutoConfirm;
    use ragdesk_core::navigation::InboundMessage;
    use ragdesk_core::state::Page;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct LoadLog(Arc<Mutex<Vec<Page>>>);

    impl PageHost for LoadLog {
        fn load(&mut self, page: Page, _resource: &str) {
            self.0.lock().unwrap().push(page);
        }
    }

    #[tokio::test]
    async fn test_navigation_shell_follows_app_pages_only() {
        let log = LoadLog::default();
        let mut shell = RagdeskApp::navigation_shell(Box::new(log.clone()));
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        tx.send(InboundMessage::navigate(APP_ORIGIN, Page::Files)).unwrap();
        tx.send(InboundMessage::navigate("https://other.example", Page::Settings))
            .unwrap();
        drop(tx);

        assert_eq!(shell.run(rx).await, 1);
        assert_eq!(shell.active_page(), Page::Files);
        assert_eq!(*log.0.lock().unwrap(), vec![Page::Files]);
    }

    #[tokio::test]
    async fn test_from_config_persists_under_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = ClientConfig {
            data_dir: Some(temp_dir.path().to_path_buf()),
            ..ClientConfig::default()
        };

        let app = RagdeskApp::from_config(&config, Arc::new(AutoConfirm))
            .await
            .unwrap();
        let session = app.sessions.new_session().await.unwrap();
        assert!(temp_dir.path().join("state/sessions.json").exists());

        let reopened = RagdeskApp::from_config(&config, Arc::new(AutoConfirm))
            .await
            .unwrap();
        assert_eq!(reopened.sessions.current_session_id().await, Some(session.id));
        assert_eq!(reopened.catalog().await.selected(), RagMethod::SimpleRag);
    }
}
