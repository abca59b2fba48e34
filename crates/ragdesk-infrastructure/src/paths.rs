//! Path management for RagDesk configuration and state.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/ragdesk/           # Config directory
//! └── config.toml              # Client configuration
//!
//! ~/.local/share/ragdesk/      # Data directory
//! └── state/                   # Persisted key-value region
//!     ├── sessions.json
//!     ├── currentSessionId.json
//!     └── settings.json
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "ragdesk";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config or data directory could not be determined.
    DirNotFound(&'static str),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::DirNotFound(kind) => write!(f, "Cannot find {} directory", kind),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for ragdesk_core::RagdeskError {
    fn from(e: PathError) -> Self {
        ragdesk_core::RagdeskError::config(e.to_string())
    }
}

pub struct RagdeskPaths;

impl RagdeskPaths {
    /// Returns the config directory (e.g., `~/.config/ragdesk/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR))
            .ok_or(PathError::DirNotFound("config"))
    }

    /// Returns the data directory (e.g., `~/.local/share/ragdesk/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .ok_or(PathError::DirNotFound("data"))
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory of the key-value state files. `data_dir_override`
    /// replaces the platform data directory when set.
    pub fn state_dir(data_dir_override: Option<&std::path::Path>) -> Result<PathBuf, PathError> {
        let base = match data_dir_override {
            Some(dir) => dir.to_path_buf(),
            None => Self::data_dir()?,
        };
        Ok(base.join("state"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_state_dir_honours_override() {
        let dir = RagdeskPaths::state_dir(Some(Path::new("/tmp/ragdesk-data"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/ragdesk-data/state"));
    }

    #[test]
    fn test_config_file_name() {
        if let Ok(path) = RagdeskPaths::config_file() {
            assert!(path.ends_with("ragdesk/config.toml"));
        }
    }
}
