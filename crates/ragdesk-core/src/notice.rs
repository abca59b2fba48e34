//! User-visible, dismissible notices.
//!
//! Components report failed requests and partial failures here instead of
//! propagating them to a global handler.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub text: String,
}

/// Ordered list of notices that have not been dismissed yet.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    next_id: AtomicU64,
    notices: Mutex<Vec<Notice>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts a notice and returns its id.
    pub fn post(&self, level: NoticeLevel, text: impl Into<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let notice = Notice {
            id,
            level,
            text: text.into(),
        };
        self.lock().push(notice);
        id
    }

    pub fn info(&self, text: impl Into<String>) -> u64 {
        self.post(NoticeLevel::Info, text)
    }

    pub fn warning(&self, text: impl Into<String>) -> u64 {
        self.post(NoticeLevel::Warning, text)
    }

    pub fn error(&self, text: impl Into<String>) -> u64 {
        self.post(NoticeLevel::Error, text)
    }

    /// Removes the notice with `id`. Returns false if it was already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut notices = self.lock();
        let before = notices.len();
        notices.retain(|n| n.id != id);
        notices.len() != before
    }

    pub fn list(&self) -> Vec<Notice> {
        self.lock().clone()
    }

    /// Removes and returns every pending notice.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notice>> {
        self.notices.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
