//! Index creation/deletion and file deletion against the registry.

use crate::confirm::Confirmation;
use ragdesk_core::backend::{DeleteFilesResponse, FailedFile, RagBackend};
use ragdesk_core::error::{RagdeskError, Result};
use ragdesk_core::file::FileRegistry;
use ragdesk_core::notice::NoticeBoard;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Result of an index-creation request.
///
/// Partial failure is not an error: names in `indexed` were applied to the
/// registry, names in `failed` were reported one by one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    pub message: String,
    pub indexed: Vec<String>,
    pub failed: Vec<FailedFile>,
}

impl IndexReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// What the backend says a combined delete removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    pub message: String,
    pub deleted_files: Vec<String>,
    pub deleted_indexes: Vec<String>,
}

impl From<DeleteFilesResponse> for DeleteSummary {
    fn from(response: DeleteFilesResponse) -> Self {
        Self {
            message: response.message,
            deleted_files: response.deleted_files,
            deleted_indexes: response.deleted_indexes,
        }
    }
}

impl fmt::Display for DeleteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = Vec::new();
        if !self.message.is_empty() {
            lines.push(self.message.clone());
        }
        if !self.deleted_files.is_empty() {
            lines.push(format!("已删除文件: {}", self.deleted_files.join(", ")));
        }
        if !self.deleted_indexes.is_empty() {
            lines.push(format!("已删除索引: {}", self.deleted_indexes.join(", ")));
        }
        write!(f, "{}", lines.join("\n"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the cascade prompt; nothing was sent.
    Cancelled,
    Deleted(DeleteSummary),
}

/// Counts in-flight requests; decremented when dropped.
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Issues index and delete requests and reconciles the registry with the
/// backend's answer.
///
/// The registry is only touched with names from a successful response; a
/// failed request changes nothing locally.
pub struct IndexCoordinator {
    backend: Arc<dyn RagBackend>,
    registry: Arc<FileRegistry>,
    notices: Arc<NoticeBoard>,
    confirmation: Arc<dyn Confirmation>,
    in_flight: AtomicUsize,
}

impl IndexCoordinator {
    pub fn new(
        backend: Arc<dyn RagBackend>,
        registry: Arc<FileRegistry>,
        notices: Arc<NoticeBoard>,
        confirmation: Arc<dyn Confirmation>,
    ) -> Self {
        Self {
            backend,
            registry,
            notices,
            confirmation,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Whether any request issued by this coordinator is still pending.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Requests index creation for `names`.
    ///
    /// Re-indexing an already indexed file is accepted and re-confirms it.
    pub async fn create_index(&self, names: &[String]) -> Result<IndexReport> {
        self.require_names(names, "创建索引")?;
        let _busy = BusyGuard::enter(&self.in_flight);

        tracing::info!("[IndexCoordinator] Creating index for {} files", names.len());
        let response = match self.backend.create_index(names).await {
            Ok(response) => response,
            Err(e) => return Err(self.report_failure("创建索引失败", e)),
        };

        let failed_names: HashSet<&str> = response
            .failed_files
            .iter()
            .map(|f| f.filename.as_str())
            .collect();
        let indexed: Vec<String> = names
            .iter()
            .filter(|n| !failed_names.contains(n.as_str()))
            .cloned()
            .collect();

        self.registry.mark_indexed(&indexed, true).await;

        for failure in &response.failed_files {
            tracing::warn!(
                "[IndexCoordinator] Indexing {} failed: {}",
                failure.filename,
                failure.reason
            );
            self.notices
                .warning(format!("{} 索引失败: {}", failure.filename, failure.reason));
        }
        if !indexed.is_empty() {
            self.notices
                .info(format!("索引创建成功: {}", indexed.join(", ")));
        }

        Ok(IndexReport {
            message: response.message,
            indexed,
            failed: response.failed_files,
        })
    }

    /// Requests index removal for `names` and clears their `indexed` flag.
    pub async fn delete_index(&self, names: &[String]) -> Result<Vec<String>> {
        self.require_names(names, "删除索引")?;
        let _busy = BusyGuard::enter(&self.in_flight);

        let response = match self.backend.delete_index(names).await {
            Ok(response) => response,
            Err(e) => return Err(self.report_failure("删除索引失败", e)),
        };

        let cleared = self.registry.mark_indexed(names, false).await;
        tracing::info!(
            "[IndexCoordinator] Deleted index for {} files",
            cleared.len()
        );
        let text = if response.message.is_empty() {
            format!("索引已删除: {}", names.join(", "))
        } else {
            response.message
        };
        self.notices.info(text);
        Ok(cleared)
    }

    /// Deletes files, cascading to their indexes on the backend.
    ///
    /// When some of `names` are indexed the user is asked first; declining
    /// returns [`DeleteOutcome::Cancelled`] without sending anything.
    pub async fn delete_files(&self, names: &[String]) -> Result<DeleteOutcome> {
        self.require_names(names, "删除文件")?;

        let indexed = self.registry.indexed_subset(names).await;
        if !indexed.is_empty() {
            let prompt = format!(
                "以下文件已建立索引，删除文件将同时删除其索引：{}。确定要删除吗？",
                indexed.join(", ")
            );
            if !self.confirmation.confirm(&prompt).await {
                tracing::debug!("[IndexCoordinator] Delete cancelled by user");
                return Ok(DeleteOutcome::Cancelled);
            }
        }

        let _busy = BusyGuard::enter(&self.in_flight);
        let response = match self.backend.delete_files(names).await {
            Ok(response) => response,
            Err(e) => return Err(self.report_failure("删除文件失败", e)),
        };

        let mut summary = DeleteSummary::from(response);
        if summary.deleted_files.is_empty() {
            // No per-file list in the response: take the catalog from the backend.
            match self.registry.refresh().await {
                Ok(_) => {
                    for name in names {
                        if self.registry.get(name).await.is_none() {
                            summary.deleted_files.push(name.clone());
                        }
                    }
                }
                Err(e) => tracing::warn!(
                    "[IndexCoordinator] Catalog re-fetch after delete failed: {}",
                    e
                ),
            }
        } else {
            self.registry.remove(&summary.deleted_files).await;
        }
        if summary.deleted_indexes.is_empty() {
            // Deleting a file drops its index on the backend.
            summary.deleted_indexes = indexed
                .into_iter()
                .filter(|n| summary.deleted_files.contains(n))
                .collect();
        }
        self.registry.clear_selection().await;

        tracing::info!(
            "[IndexCoordinator] Deleted {} files, {} indexes",
            summary.deleted_files.len(),
            summary.deleted_indexes.len()
        );
        self.notices.info(summary.to_string());
        Ok(DeleteOutcome::Deleted(summary))
    }

    fn require_names(&self, names: &[String], action: &str) -> Result<()> {
        if names.is_empty() {
            let err = RagdeskError::validation(format!("{}: 未选择文件", action));
            self.notices.warning(err.to_string());
            return Err(err);
        }
        Ok(())
    }

    fn report_failure(&self, action: &str, err: RagdeskError) -> RagdeskError {
        tracing::warn!("[IndexCoordinator] {}: {}", action, err);
        self.notices.error(format!("{}: {}", action, err));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ragdesk_core::backend::{
        ChatRequest, ChatResponse, CreateIndexResponse, FileListResponse, MessageResponse,
        RemoteFile, UploadResponse,
    };
    use std::path::Path;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicBool;

    /// Which lists a delete response carries.
    #[derive(Default, Clone, Copy)]
    enum DeleteReply {
        #[default]
        Full,
        FilesOnly,
        MessageOnly,
    }

    #[derive(Default)]
    struct MockBackend {
        files: Mutex<Vec<RemoteFile>>,
        failed: Vec<FailedFile>,
        fail_requests: bool,
        fail_listing: AtomicBool,
        delete_reply: DeleteReply,
        requests: Mutex<Vec<String>>,
    }

    impl MockBackend {
        fn record(&self, call: &str) -> Result<()> {
            self.requests.lock().unwrap().push(call.to_string());
            if self.fail_requests {
                return Err(RagdeskError::http_status(500, "server error"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl RagBackend for MockBackend {
        async fn list_files(&self) -> Result<FileListResponse> {
            if self.fail_listing.load(Ordering::SeqCst) {
                return Err(RagdeskError::transport("connection refused"));
            }
            Ok(FileListResponse {
                files: self.files.lock().unwrap().clone(),
            })
        }

        async fn upload_file(&self, _path: &Path) -> Result<UploadResponse> {
            unimplemented!()
        }

        async fn delete_files(&self, names: &[String]) -> Result<DeleteFilesResponse> {
            self.record("delete_files")?;
            let mut files = self.files.lock().unwrap();
            let deleted_indexes: Vec<String> = files
                .iter()
                .filter(|f| f.indexed && names.contains(&f.filename))
                .map(|f| f.filename.clone())
                .collect();
            files.retain(|f| !names.contains(&f.filename));
            let (deleted_files, deleted_indexes) = match self.delete_reply {
                DeleteReply::Full => (names.to_vec(), deleted_indexes),
                DeleteReply::FilesOnly => (names.to_vec(), Vec::new()),
                DeleteReply::MessageOnly => (Vec::new(), Vec::new()),
            };
            Ok(DeleteFilesResponse {
                message: "ok".to_string(),
                deleted_files,
                deleted_indexes,
            })
        }

        async fn create_index(&self, _names: &[String]) -> Result<CreateIndexResponse> {
            self.record("create_index")?;
            Ok(CreateIndexResponse {
                message: "done".to_string(),
                failed_files: self.failed.clone(),
            })
        }

        async fn delete_index(&self, _names: &[String]) -> Result<MessageResponse> {
            self.record("delete_index")?;
            Ok(MessageResponse::default())
        }

        async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse> {
            unimplemented!()
        }
    }

    struct Answer(bool);

    #[async_trait]
    impl Confirmation for Answer {
        async fn confirm(&self, _prompt: &str) -> bool {
            self.0
        }
    }

    fn remote(name: &str, indexed: bool) -> RemoteFile {
        RemoteFile {
            filename: name.to_string(),
            size: 1,
            file_type: String::new(),
            indexed,
        }
    }

    async fn setup(
        backend: MockBackend,
        answer: bool,
    ) -> (Arc<MockBackend>, Arc<FileRegistry>, IndexCoordinator) {
        let backend = Arc::new(backend);
        let notices = Arc::new(NoticeBoard::new());
        let registry = Arc::new(FileRegistry::new(backend.clone(), notices.clone()));
        registry.refresh().await.unwrap();
        let coordinator = IndexCoordinator::new(
            backend.clone(),
            registry.clone(),
            notices,
            Arc::new(Answer(answer)),
        );
        (backend, registry, coordinator)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_create_index_applies_successes_only() {
        let backend = MockBackend {
            files: Mutex::new(vec![remote("a.txt", false), remote("c.docx", false)]),
            failed: vec![FailedFile {
                filename: "c.docx".to_string(),
                reason: "unsupported".to_string(),
            }],
            ..Default::default()
        };
        let (_backend, registry, coordinator) = setup(backend, true).await;

        let report = coordinator
            .create_index(&names(&["a.txt", "c.docx"]))
            .await
            .unwrap();
        assert_eq!(report.indexed, names(&["a.txt"]));
        assert!(!report.is_complete());
        assert!(registry.get("a.txt").await.unwrap().indexed);
        assert!(!registry.get("c.docx").await.unwrap().indexed);
        assert!(!coordinator.is_busy());
    }

    #[tokio::test]
    async fn test_empty_name_set_sends_nothing() {
        let (backend, _registry, coordinator) = setup(MockBackend::default(), true).await;
        assert!(coordinator.create_index(&[]).await.unwrap_err().is_validation());
        assert!(coordinator.delete_files(&[]).await.unwrap_err().is_validation());
        assert!(backend.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_request_changes_nothing() {
        let backend = MockBackend {
            files: Mutex::new(vec![remote("a.txt", true)]),
            fail_requests: true,
            ..Default::default()
        };
        let (_backend, registry, coordinator) = setup(backend, true).await;
        registry.set_select_all(true).await;

        let err = coordinator.delete_index(&names(&["a.txt"])).await.unwrap_err();
        assert!(err.is_network());
        let err = coordinator.delete_files(&names(&["a.txt"])).await.unwrap_err();
        assert!(err.is_network());

        assert!(registry.get("a.txt").await.unwrap().indexed);
        assert_eq!(registry.selected_names().await, names(&["a.txt"]));
        assert!(!coordinator.is_busy());
    }

    #[tokio::test]
    async fn test_declined_cascade_prompt_is_silent() {
        let backend = MockBackend {
            files: Mutex::new(vec![remote("b.pdf", true)]),
            ..Default::default()
        };
        let (backend, registry, coordinator) = setup(backend, false).await;

        let outcome = coordinator.delete_files(&names(&["b.pdf"])).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert!(backend.requests.lock().unwrap().is_empty());
        assert!(registry.get("b.pdf").await.is_some());
    }

    #[tokio::test]
    async fn test_unindexed_delete_needs_no_prompt() {
        let backend = MockBackend {
            files: Mutex::new(vec![remote("a.txt", false)]),
            ..Default::default()
        };
        let (_backend, registry, coordinator) = setup(backend, false).await;

        let outcome = coordinator.delete_files(&names(&["a.txt"])).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Deleted(_)));
        assert!(registry.get("a.txt").await.is_none());
    }

    #[tokio::test]
    async fn test_delete_index_clears_flag() {
        let backend = MockBackend {
            files: Mutex::new(vec![remote("b.pdf", true)]),
            ..Default::default()
        };
        let (_backend, registry, coordinator) = setup(backend, true).await;

        let cleared = coordinator.delete_index(&names(&["b.pdf"])).await.unwrap();
        assert_eq!(cleared, names(&["b.pdf"]));
        assert!(!registry.get("b.pdf").await.unwrap().indexed);
    }

    #[tokio::test]
    async fn test_summary_derives_cascade_when_response_omits_indexes() {
        let backend = MockBackend {
            files: Mutex::new(vec![remote("a.txt", false), remote("b.pdf", true)]),
            delete_reply: DeleteReply::FilesOnly,
            ..Default::default()
        };
        let (_backend, registry, coordinator) = setup(backend, true).await;

        let outcome = coordinator
            .delete_files(&names(&["a.txt", "b.pdf"]))
            .await
            .unwrap();
        let DeleteOutcome::Deleted(summary) = outcome else {
            panic!("delete was cancelled");
        };
        assert_eq!(summary.deleted_indexes, names(&["b.pdf"]));
        assert!(summary.to_string().contains("已删除索引: b.pdf"));
        assert!(registry.snapshot().await.records.is_empty());
    }

    #[tokio::test]
    async fn test_bare_delete_response_refetches_catalog() {
        let backend = MockBackend {
            files: Mutex::new(vec![remote("a.txt", false), remote("b.pdf", true)]),
            delete_reply: DeleteReply::MessageOnly,
            ..Default::default()
        };
        let (_backend, registry, coordinator) = setup(backend, true).await;

        let outcome = coordinator.delete_files(&names(&["b.pdf"])).await.unwrap();
        let DeleteOutcome::Deleted(summary) = outcome else {
            panic!("delete was cancelled");
        };
        assert_eq!(summary.deleted_files, names(&["b.pdf"]));
        assert_eq!(summary.deleted_indexes, names(&["b.pdf"]));
        assert!(registry.get("b.pdf").await.is_none());
        assert!(registry.get("a.txt").await.is_some());
    }

    #[tokio::test]
    async fn test_failed_refetch_after_bare_delete_keeps_records() {
        let backend = MockBackend {
            files: Mutex::new(vec![remote("a.txt", false)]),
            delete_reply: DeleteReply::MessageOnly,
            ..Default::default()
        };
        let (backend, registry, coordinator) = setup(backend, true).await;
        registry.set_select_all(true).await;
        backend.fail_listing.store(true, Ordering::SeqCst);

        let outcome = coordinator.delete_files(&names(&["a.txt"])).await.unwrap();
        let DeleteOutcome::Deleted(summary) = outcome else {
            panic!("delete was cancelled");
        };
        assert!(summary.deleted_files.is_empty());
        assert!(registry.get("a.txt").await.is_some());
        assert!(registry.selected_names().await.is_empty());
        assert!(!coordinator.is_busy());
    }

    #[test]
    fn test_summary_lists_files_and_indexes() {
        let summary = DeleteSummary {
            message: "成功删除 2 个文件".to_string(),
            deleted_files: names(&["a.txt", "b.pdf"]),
            deleted_indexes: names(&["b.pdf"]),
        };
        assert_eq!(
            summary.to_string(),
            "成功删除 2 个文件\n已删除文件: a.txt, b.pdf\n已删除索引: b.pdf"
        );
    }
}
