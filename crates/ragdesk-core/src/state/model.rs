//! Application state domain models.
//!
//! `AppState` lives for the life of the shell and is never persisted;
//! a full reload starts again from [`AppState::default`].

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// A page the shell can host in its embedded context.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Page {
    #[default]
    Chat,
    Files,
    RagMethods,
    Settings,
}

impl Page {
    /// Resource the embedded context loads for this page.
    pub fn resource(self) -> &'static str {
        match self {
            Page::Chat => "pages/chat.html",
            Page::Files => "pages/files.html",
            Page::RagMethods => "pages/rag-methods.html",
            Page::Settings => "pages/settings.html",
        }
    }

    pub fn all() -> impl Iterator<Item = Page> {
        Page::iter()
    }
}

/// Shell-level state: which page is active and whether the sidebar is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub active_page: Page,
    pub sidebar_expanded: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_page: Page::default(),
            sidebar_expanded: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_names_round_trip_through_strings() {
        assert_eq!("rag-methods".parse::<Page>().unwrap(), Page::RagMethods);
        assert_eq!(Page::Files.to_string(), "files");
        assert!("dashboard".parse::<Page>().is_err());
    }

    #[test]
    fn test_every_page_has_a_resource() {
        assert_eq!(Page::all().count(), 4);
        assert!(Page::all().all(|p| p.resource().ends_with(".html")));
    }

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(state.active_page, Page::Chat);
        assert!(state.sidebar_expanded);
    }
}
