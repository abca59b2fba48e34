use super::message::{InboundMessage, NavigationMessage};
use crate::state::{AppState, Page};
use tokio::sync::mpsc;

/// The embedded context that renders the active page.
pub trait PageHost: Send {
    fn load(&mut self, page: Page, resource: &str);
}

/// Hosts one page at a time and relays navigation requests from it.
pub struct NavigationShell {
    origin: String,
    state: AppState,
    host: Box<dyn PageHost>,
}

impl NavigationShell {
    /// Creates a shell that trusts messages from `origin` only.
    pub fn new(origin: impl Into<String>, host: Box<dyn PageHost>) -> Self {
        Self {
            origin: origin.into(),
            state: AppState::default(),
            host,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn active_page(&self) -> Page {
        self.state.active_page
    }

    /// Makes `page` active and loads its resource in the embedded context.
    pub fn switch_page(&mut self, page: Page) {
        self.state.active_page = page;
        self.host.load(page, page.resource());
        tracing::debug!("[NavigationShell] Switched to page: {}", page);
    }

    /// Applies a message from the embedded context.
    ///
    /// Returns `true` when the message was a recognized navigate request.
    /// Foreign origins, other shapes and unknown pages are dropped.
    pub fn on_child_message(&mut self, message: &InboundMessage) -> bool {
        if message.origin != self.origin {
            tracing::debug!(
                "[NavigationShell] Dropped message from foreign origin: {}",
                message.origin
            );
            return false;
        }

        let Some(request) = NavigationMessage::parse(&message.payload) else {
            tracing::debug!("[NavigationShell] Dropped unrecognized message shape");
            return false;
        };

        let Some(page) = request.target() else {
            tracing::debug!("[NavigationShell] Dropped navigate to unknown page: {:?}", request);
            return false;
        };

        self.switch_page(page);
        true
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.state.sidebar_expanded = !self.state.sidebar_expanded;
        self.state.sidebar_expanded
    }

    /// Applies messages until every sender is gone.
    ///
    /// Returns the number of messages that switched the page.
    pub async fn run(&mut self, mut rx: mpsc::UnboundedReceiver<InboundMessage>) -> usize {
        let mut applied = 0;
        while let Some(message) = rx.recv().await {
            if self.on_child_message(&message) {
                applied += 1;
            }
        }
        tracing::debug!("[NavigationShell] Message channel closed");
        applied
    }
}
