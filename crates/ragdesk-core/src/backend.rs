//! Backend port and wire types.
//!
//! `RagBackend` is the only way the client reaches the retrieval service.
//! The DTOs below mirror the JSON bodies exchanged with it; domain types are
//! built from them by the components that issued the request.

use crate::catalog::RagMethod;
use crate::error::Result;
use crate::session::SourceKind;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One entry of the remote file catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub filename: String,
    pub size: u64,
    #[serde(rename = "type", default)]
    pub file_type: String,
    #[serde(default)]
    pub indexed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileListResponse {
    #[serde(default)]
    pub files: Vec<RemoteFile>,
}

/// Request body shared by delete-files, create-index and delete-index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNamesRequest {
    pub filenames: Vec<String>,
}

impl FileNamesRequest {
    pub fn new(names: &[String]) -> Self {
        Self {
            filenames: names.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFilesResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "deleted")]
    pub deleted_files: Vec<String>,
    #[serde(default)]
    pub deleted_indexes: Vec<String>,
}

/// A file the backend could not index, with its reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedFile {
    pub filename: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndexResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub failed_files: Vec<FailedFile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: String,
    pub filename: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub rag_method: RagMethod,
    pub polish: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub source_kind: Option<SourceKind>,
}

/// Request/response contract of the retrieval service.
///
/// Every method resolves to `Err(RagdeskError::Network { .. })` on transport
/// rejection or a non-success status; callers treat that as "nothing
/// changed on the backend".
#[async_trait]
pub trait RagBackend: Send + Sync {
    async fn list_files(&self) -> Result<FileListResponse>;

    async fn upload_file(&self, path: &Path) -> Result<UploadResponse>;

    /// Deletes files, cascading to their indexes.
    async fn delete_files(&self, names: &[String]) -> Result<DeleteFilesResponse>;

    async fn create_index(&self, names: &[String]) -> Result<CreateIndexResponse>;

    async fn delete_index(&self, names: &[String]) -> Result<MessageResponse>;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_list_defaults_missing_indexed_flag() {
        let json = r#"{"files":[{"filename":"a.txt","size":12,"type":".txt"}]}"#;
        let parsed: FileListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.files.len(), 1);
        assert!(!parsed.files[0].indexed);
        assert_eq!(parsed.files[0].file_type, ".txt");
    }

    #[test]
    fn test_delete_response_optional_lists() {
        let parsed: DeleteFilesResponse =
            serde_json::from_str(r#"{"message":"ok","deletedFiles":["a.txt"]}"#).unwrap();
        assert_eq!(parsed.deleted_files, vec!["a.txt".to_string()]);
        assert!(parsed.deleted_indexes.is_empty());

        let legacy: DeleteFilesResponse =
            serde_json::from_str(r#"{"message":"ok","deleted":["b.pdf"],"failed":[]}"#).unwrap();
        assert_eq!(legacy.deleted_files, vec!["b.pdf".to_string()]);
    }

    #[test]
    fn test_chat_request_wire_shape() {
        let request = ChatRequest {
            message: "hi".to_string(),
            rag_method: RagMethod::Reranker,
            polish: true,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"message": "hi", "ragMethod": "option7", "polish": true})
        );
    }

    #[test]
    fn test_chat_response_source_kind() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"message":"answer","sources":["a.pdf"],"sourceKind":"local"}"#,
        )
        .unwrap();
        assert_eq!(parsed.source_kind, Some(SourceKind::Local));
    }
}
