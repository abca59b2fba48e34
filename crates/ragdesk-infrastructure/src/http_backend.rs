//! HTTP adapter for the retrieval service.

use async_trait::async_trait;
use ragdesk_core::backend::{
    ChatRequest, ChatResponse, CreateIndexResponse, DeleteFilesResponse, FileListResponse,
    FileNamesRequest, MessageResponse, RagBackend, UploadResponse,
};
use ragdesk_core::error::{RagdeskError, Result};
use reqwest::{Client, Response, multipart};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

/// Talks JSON to the retrieval service with `reqwest`.
///
/// Requests carry no explicit timeout; a failure is a transport error or
/// a non-success status, both mapped to `RagdeskError::Network`.
#[derive(Clone)]
pub struct HttpRagBackend {
    client: Client,
    base_url: String,
}

impl HttpRagBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| RagdeskError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RagdeskError::transport(format!("GET {} failed: {}", url, e)))?;
        decode(response).await
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| RagdeskError::transport(format!("POST {} failed: {}", url, e)))?;
        decode(response).await
    }
}

/// Checks the status and parses the body.
async fn decode<R: DeserializeOwned>(response: Response) -> Result<R> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| RagdeskError::transport(format!("Failed to read response body: {}", e)))?;

    if !status.is_success() {
        tracing::warn!("[HttpRagBackend] Request failed with status {}", status);
        return Err(RagdeskError::http_status(status.as_u16(), error_detail(&body)));
    }

    Ok(serde_json::from_str(&body)?)
}

/// Pulls a readable message out of an error body.
///
/// Prefers a `detail` field, then `message`, then the raw text.
fn error_detail(body: &str) -> String {
    let fallback = || {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            "Unknown error".to_string()
        } else {
            trimmed.to_string()
        }
    };

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback();
    };

    ["detail", "message"]
        .iter()
        .find_map(|key| match value.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        })
        .unwrap_or_else(fallback)
}

#[async_trait]
impl RagBackend for HttpRagBackend {
    async fn list_files(&self) -> Result<FileListResponse> {
        self.get_json("uploads").await
    }

    async fn upload_file(&self, path: &Path) -> Result<UploadResponse> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| RagdeskError::validation(format!("not a file path: {:?}", path)))?;
        let bytes = tokio::fs::read(path).await?;
        let mime = mime_guess::from_path(path).first_or_octet_stream();

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(mime.as_ref())
            .map_err(|e| RagdeskError::internal(format!("Invalid MIME type {}: {}", mime, e)))?;
        let form = multipart::Form::new().part("file", part);

        let url = self.url("upload");
        tracing::debug!("[HttpRagBackend] Uploading {} as {}", file_name, mime);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| RagdeskError::transport(format!("POST {} failed: {}", url, e)))?;
        decode(response).await
    }

    async fn delete_files(&self, names: &[String]) -> Result<DeleteFilesResponse> {
        self.post_json("uploads/delete", &FileNamesRequest::new(names))
            .await
    }

    async fn create_index(&self, names: &[String]) -> Result<CreateIndexResponse> {
        self.post_json("index/create", &FileNamesRequest::new(names))
            .await
    }

    async fn delete_index(&self, names: &[String]) -> Result<MessageResponse> {
        self.post_json("index/delete", &FileNamesRequest::new(names))
            .await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.post_json("chat", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining_ignores_extra_slashes() {
        let backend = HttpRagBackend::new("http://127.0.0.1:8000/").unwrap();
        assert_eq!(backend.base_url(), "http://127.0.0.1:8000");
        assert_eq!(backend.url("/uploads/delete"), "http://127.0.0.1:8000/uploads/delete");
        assert_eq!(backend.url("chat"), "http://127.0.0.1:8000/chat");
    }

    #[test]
    fn test_error_detail_prefers_detail_field() {
        assert_eq!(
            error_detail(r#"{"detail":"不支持的文件类型","message":"x"}"#),
            "不支持的文件类型"
        );
        assert_eq!(error_detail(r#"{"message":"index missing"}"#), "index missing");
    }

    #[test]
    fn test_error_detail_handles_structured_and_raw_bodies() {
        assert_eq!(
            error_detail(r#"{"detail":[{"loc":["body"],"msg":"field required"}]}"#),
            r#"[{"loc":["body"],"msg":"field required"}]"#
        );
        assert_eq!(error_detail("Internal Server Error"), "Internal Server Error");
        assert_eq!(error_detail(""), "Unknown error");
        assert_eq!(error_detail(r#"{"detail":null}"#), r#"{"detail":null}"#);
    }

    #[tokio::test]
    async fn test_upload_of_missing_file_fails_before_request() {
        let backend = HttpRagBackend::new("http://127.0.0.1:9").unwrap();
        let err = backend
            .upload_file(Path::new("/definitely/not/here.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, RagdeskError::Io { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let backend = HttpRagBackend::new("http://127.0.0.1:9").unwrap();
        match backend.list_files().await.unwrap_err() {
            RagdeskError::Network { status, .. } => assert!(status.is_none()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
