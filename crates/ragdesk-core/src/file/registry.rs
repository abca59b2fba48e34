//! Backend-synchronized file registry.

use super::model::{FileRecord, validate_upload_name};
use super::view::FileCatalogView;
use crate::backend::{RagBackend, UploadResponse};
use crate::error::Result;
use crate::notice::NoticeBoard;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Point-in-time copy of the registry for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySnapshot {
    pub records: Vec<FileRecord>,
    pub filtered: Vec<FileRecord>,
    pub selection: Vec<String>,
    pub query: String,
    pub select_all: bool,
}

/// Mirrors the remote file catalog.
///
/// The in-memory list only changes after the backend confirms a change:
/// `refresh` replaces it wholesale, and `remove` / `mark_indexed` are
/// called by the index coordinator with names taken from a successful
/// response. A failed request leaves the list and selection untouched.
pub struct FileRegistry {
    backend: Arc<dyn RagBackend>,
    notices: Arc<NoticeBoard>,
    view: RwLock<FileCatalogView>,
}

impl FileRegistry {
    pub fn new(backend: Arc<dyn RagBackend>, notices: Arc<NoticeBoard>) -> Self {
        Self {
            backend,
            notices,
            view: RwLock::new(FileCatalogView::default()),
        }
    }

    /// Re-fetches the catalog. On success the list is replaced and the
    /// selection cleared; on failure nothing changes and a notice is posted.
    ///
    /// Returns the number of records now held.
    pub async fn refresh(&self) -> Result<usize> {
        let response = match self.backend.list_files().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("[FileRegistry] Failed to list files: {}", e);
                self.notices.error(format!("加载文件列表失败: {}", e));
                return Err(e);
            }
        };

        let records: Vec<FileRecord> = response.files.into_iter().map(FileRecord::from).collect();
        let count = records.len();
        self.view.write().await.replace(records);

        tracing::info!("[FileRegistry] Refreshed catalog: {} files", count);
        Ok(count)
    }

    /// Uploads a file after validating its extension, then re-fetches the
    /// catalog so the new record comes from the backend.
    pub async fn upload(&self, path: &Path) -> Result<UploadResponse> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if let Err(e) = validate_upload_name(&name) {
            tracing::debug!("[FileRegistry] Rejected upload {:?}: {}", path, e);
            self.notices.warning(e.to_string());
            return Err(e);
        }

        let response = match self.backend.upload_file(path).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("[FileRegistry] Upload of {} failed: {}", name, e);
                self.notices.error(format!("文件上传失败: {}", e));
                return Err(e);
            }
        };

        tracing::info!(
            "[FileRegistry] Uploaded {} ({} bytes)",
            response.filename,
            response.size
        );
        self.notices.info(format!("文件上传成功: {}", response.filename));

        // The upload is confirmed; refresh() posts its own notice on failure.
        if let Err(e) = self.refresh().await {
            tracing::debug!("[FileRegistry] Catalog stale after upload: {}", e);
        }
        Ok(response)
    }

    /// Updates the search query. The selection is left as is.
    pub async fn set_search(&self, query: &str) {
        self.view.write().await.set_search(query);
    }

    /// Flips `name` in the selection if it is in the filtered view.
    pub async fn toggle(&self, name: &str) -> bool {
        self.view.write().await.toggle(name)
    }

    pub async fn set_select_all(&self, flag: bool) {
        self.view.write().await.set_select_all(flag);
    }

    pub async fn clear_selection(&self) {
        self.view.write().await.clear_selection();
    }

    /// Removes confirmed-deleted names from the list and the selection.
    pub async fn remove(&self, names: &[String]) {
        self.view.write().await.remove(names);
        tracing::debug!("[FileRegistry] Removed {} records", names.len());
    }

    /// Sets `indexed` on confirmed names; returns the names that matched.
    pub async fn mark_indexed(&self, names: &[String], indexed: bool) -> Vec<String> {
        self.view.write().await.set_indexed(names, indexed)
    }

    pub async fn indexed_subset(&self, names: &[String]) -> Vec<String> {
        self.view.read().await.indexed_subset(names)
    }

    pub async fn selected_names(&self) -> Vec<String> {
        self.view.read().await.selection().iter().cloned().collect()
    }

    pub async fn select_all(&self) -> bool {
        self.view.read().await.select_all()
    }

    pub async fn get(&self, name: &str) -> Option<FileRecord> {
        self.view.read().await.get(name).cloned()
    }

    pub async fn snapshot(&self) -> RegistrySnapshot {
        let view = self.view.read().await;
        RegistrySnapshot {
            records: view.records().to_vec(),
            filtered: view.filtered().cloned().collect(),
            selection: view.selection().iter().cloned().collect(),
            query: view.query().to_string(),
            select_all: view.select_all(),
        }
    }
}
