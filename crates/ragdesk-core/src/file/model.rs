//! File record model.

use crate::backend::RemoteFile;
use crate::error::{RagdeskError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extensions the backend accepts for upload (lowercase, with dot).
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    ".txt", ".md", ".csv", ".pdf", ".doc", ".docx", ".xls", ".xlsx",
];

/// Client-side mirror of one remote file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Backend-assigned unique name
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Extension including the dot, e.g. `.pdf`
    pub extension: String,
    pub indexed: bool,
}

impl FileRecord {
    /// Human-readable size, e.g. `512 B`, `1.5 KB`, `2.0 MB`.
    pub fn display_size(&self) -> String {
        const UNITS: [&str; 3] = ["KB", "MB", "GB"];
        if self.size < 1024 {
            return format!("{} B", self.size);
        }
        let mut value = self.size as f64 / 1024.0;
        let mut unit = 0;
        while value >= 1024.0 && unit < UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }
        format!("{:.1} {}", value, UNITS[unit])
    }
}

impl From<RemoteFile> for FileRecord {
    fn from(remote: RemoteFile) -> Self {
        let extension = if remote.file_type.trim().is_empty() {
            extension_of(&remote.filename).unwrap_or_default()
        } else {
            remote.file_type.trim().to_lowercase()
        };
        Self {
            name: remote.filename,
            size: remote.size,
            extension,
            indexed: remote.indexed,
        }
    }
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// Rejects file names whose extension the backend does not accept.
pub fn validate_upload_name(name: &str) -> Result<()> {
    match extension_of(name) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(RagdeskError::validation(format!(
            "不支持的文件类型: {}。仅支持: {}",
            name,
            ALLOWED_EXTENSIONS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(size: u64) -> FileRecord {
        FileRecord {
            name: "a.txt".to_string(),
            size,
            extension: ".txt".to_string(),
            indexed: false,
        }
    }

    #[test]
    fn test_display_size() {
        assert_eq!(record(512).display_size(), "512 B");
        assert_eq!(record(1536).display_size(), "1.5 KB");
        assert_eq!(record(2 * 1024 * 1024).display_size(), "2.0 MB");
        assert_eq!(record(3 * 1024 * 1024 * 1024).display_size(), "3.0 GB");
    }

    #[test]
    fn test_from_remote_derives_missing_extension() {
        let remote = RemoteFile {
            filename: "Report.PDF".to_string(),
            size: 10,
            file_type: String::new(),
            indexed: true,
        };
        let record = FileRecord::from(remote);
        assert_eq!(record.extension, ".pdf");
        assert!(record.indexed);
    }

    #[test]
    fn test_validate_upload_name() {
        assert!(validate_upload_name("notes.md").is_ok());
        assert!(validate_upload_name("SHEET.XLSX").is_ok());
        assert!(validate_upload_name("image.png").unwrap_err().is_validation());
        assert!(validate_upload_name("no_extension").unwrap_err().is_validation());
    }
}
