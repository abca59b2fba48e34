//! Chat turn pipeline: user message, generation request, provenance-aware reply.

use ragdesk_core::backend::{ChatRequest, ChatResponse, RagBackend};
use ragdesk_core::catalog::RagMethod;
use ragdesk_core::error::Result;
use ragdesk_core::notice::NoticeBoard;
use ragdesk_core::session::{ChatSessionStore, Message, SourceKind};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Bot message appended when the generation request fails.
pub const FAILURE_REPLY: &str = "抱歉，处理您的请求时出现错误，请稍后重试。";

const CITATION_HEADER: &str = "参考来源：";
const GENERAL_MARKER: &str = "（以上回答基于通用知识）";
const NETWORK_MARKER: &str = "（以上回答基于网络搜索结果）";

/// Why a send had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    EmptyText,
    AlreadySending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was appended and no request was sent.
    Dropped(DropReason),
    /// The backend answered; the formatted reply was appended.
    Replied { session_id: String, reply: Message },
    /// The request failed; the apology was appended instead.
    Failed { session_id: String, reply: Message },
}

impl SendOutcome {
    pub fn reply(&self) -> Option<&Message> {
        match self {
            SendOutcome::Dropped(_) => None,
            SendOutcome::Replied { reply, .. } | SendOutcome::Failed { reply, .. } => Some(reply),
        }
    }
}

/// Builds the bot message for a successful response.
///
/// Local answers with sources get a numbered citation block; general and
/// network answers get a fixed marker instead.
pub fn format_reply(response: ChatResponse) -> Message {
    let mut content = response.message;
    match response.source_kind {
        Some(SourceKind::Local) if !response.sources.is_empty() => {
            content.push_str("\n\n");
            content.push_str(CITATION_HEADER);
            for (i, source) in response.sources.iter().enumerate() {
                content.push_str(&format!("\n{}. {}", i + 1, source));
            }
        }
        Some(SourceKind::General) => {
            content.push_str("\n\n");
            content.push_str(GENERAL_MARKER);
        }
        Some(SourceKind::Network) => {
            content.push_str("\n\n");
            content.push_str(NETWORK_MARKER);
        }
        _ => {}
    }
    Message::bot(content).with_provenance(response.sources, response.source_kind)
}

/// Holds a session's sending flag; clears it when dropped.
struct SendingGuard<'a> {
    sending: &'a Mutex<HashSet<String>>,
    session_id: String,
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        lock(self.sending).remove(&self.session_id);
    }
}

fn lock(set: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    set.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Sends chat turns for sessions in a [`ChatSessionStore`].
pub struct ChatPipelineClient {
    backend: Arc<dyn RagBackend>,
    sessions: Arc<ChatSessionStore>,
    notices: Arc<NoticeBoard>,
    sending: Mutex<HashSet<String>>,
}

impl ChatPipelineClient {
    pub fn new(
        backend: Arc<dyn RagBackend>,
        sessions: Arc<ChatSessionStore>,
        notices: Arc<NoticeBoard>,
    ) -> Self {
        Self {
            backend,
            sessions,
            notices,
            sending: Mutex::new(HashSet::new()),
        }
    }

    pub fn is_sending(&self, session_id: &str) -> bool {
        lock(&self.sending).contains(session_id)
    }

    /// Sends one user turn.
    ///
    /// With `session_id == None` the active session is used, or a new one is
    /// created. The user message is persisted before the request goes out;
    /// the bot message is appended once the request resolves either way.
    /// A send for a session that is already waiting on a reply is dropped.
    ///
    /// `Err` is returned only when appending to the session store fails.
    pub async fn send(
        &self,
        session_id: Option<&str>,
        text: &str,
        method: RagMethod,
        polish: bool,
    ) -> Result<SendOutcome> {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("[ChatPipeline] Dropped empty message");
            return Ok(SendOutcome::Dropped(DropReason::EmptyText));
        }

        let session_id = match session_id {
            Some(id) => id.to_string(),
            None => self.sessions.ensure_active().await?,
        };

        let Some(_guard) = self.try_begin(&session_id) else {
            tracing::warn!(
                "[ChatPipeline] Dropped send for {}: request already in flight",
                session_id
            );
            return Ok(SendOutcome::Dropped(DropReason::AlreadySending));
        };

        self.sessions
            .append_message(&session_id, Message::user(text))
            .await?;

        let request = ChatRequest {
            message: text.to_string(),
            rag_method: method,
            polish,
        };
        tracing::info!(
            "[ChatPipeline] Sending turn for {} with {} (polish: {})",
            session_id,
            method,
            polish
        );

        match self.backend.chat(&request).await {
            Ok(response) => {
                let reply = format_reply(response);
                self.sessions
                    .append_message(&session_id, reply.clone())
                    .await?;
                Ok(SendOutcome::Replied { session_id, reply })
            }
            Err(e) => {
                tracing::warn!("[ChatPipeline] Chat request failed: {}", e);
                self.notices.error(format!("发送消息失败: {}", e));
                let reply = Message::bot(FAILURE_REPLY);
                self.sessions
                    .append_message(&session_id, reply.clone())
                    .await?;
                Ok(SendOutcome::Failed { session_id, reply })
            }
        }
    }

    /// Sets the sending flag unless it is already set.
    fn try_begin(&self, session_id: &str) -> Option<SendingGuard<'_>> {
        if !lock(&self.sending).insert(session_id.to_string()) {
            return None;
        }
        Some(SendingGuard {
            sending: &self.sending,
            session_id: session_id.to_string(),
        })
    }
}
