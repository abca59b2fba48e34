use crate::catalog::RagMethod;
use crate::error::{RagdeskError, Result};
use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use strum::{AsRefStr, Display, EnumString};

/// Which generation endpoint the backend should talk to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ApiEndpointType {
    #[default]
    Ollama,
    Deepseek,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

/// Recognized user options.
///
/// Unknown keys in stored data are ignored and missing keys take their
/// defaults, so older or hand-edited files still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub api_endpoint_type: ApiEndpointType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Characters per chunk
    pub chunk_size: u32,
    pub chunk_overlap: u32,
    /// Number of chunks retrieved per query
    pub top_k: u32,
    pub similarity_threshold: f64,
    pub default_method: RagMethod,
    pub theme: Theme,
    pub language: String,
    pub auto_save: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint_type: ApiEndpointType::default(),
            api_key: None,
            chunk_size: 500,
            chunk_overlap: 50,
            top_k: 5,
            similarity_threshold: 0.7,
            default_method: RagMethod::default(),
            theme: Theme::default(),
            language: "zh-CN".to_string(),
            auto_save: true,
        }
    }
}

impl Settings {
    /// Checks cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(RagdeskError::validation("chunk_size must be greater than 0"));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(RagdeskError::validation(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.top_k == 0 {
            return Err(RagdeskError::validation("top_k must be greater than 0"));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(RagdeskError::validation(format!(
                "similarity_threshold ({}) must be within [0, 1]",
                self.similarity_threshold
            )));
        }
        Ok(())
    }

    /// Sets one option from its string form, as typed on a command line.
    ///
    /// Accepts both `snake_case` and `camelCase` names.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        let invalid =
            |e: String| RagdeskError::validation(format!("invalid value for {}: {}", name, e));
        match name {
            "api_endpoint_type" | "apiEndpointType" => {
                self.api_endpoint_type = value.parse().map_err(|_| invalid(value.to_string()))?
            }
            "api_key" | "apiKey" => {
                self.api_key = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "chunk_size" | "chunkSize" => {
                self.chunk_size = value
                    .parse()
                    .map_err(|e: ParseIntError| invalid(e.to_string()))?
            }
            "chunk_overlap" | "chunkOverlap" => {
                self.chunk_overlap = value
                    .parse()
                    .map_err(|e: ParseIntError| invalid(e.to_string()))?
            }
            "top_k" | "topK" => {
                self.top_k = value
                    .parse()
                    .map_err(|e: ParseIntError| invalid(e.to_string()))?
            }
            "similarity_threshold" | "similarityThreshold" => {
                self.similarity_threshold = value
                    .parse()
                    .map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))?
            }
            "default_method" | "defaultMethod" => {
                self.default_method = value
                    .parse()
                    .map_err(|_| RagdeskError::not_found("RagMethod", value))?
            }
            "theme" => self.theme = value.parse().map_err(|_| invalid(value.to_string()))?,
            "language" => self.language = value.to_string(),
            "auto_save" | "autoSave" => {
                self.auto_save = value
                    .parse()
                    .map_err(|e: std::str::ParseBoolError| invalid(e.to_string()))?
            }
            other => {
                return Err(RagdeskError::validation(format!("unknown setting: {}", other)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.default_method.id(), "option1");
    }

    #[test]
    fn test_validate_rejects_overlap_not_below_size() {
        let settings = Settings {
            chunk_size: 100,
            chunk_overlap: 100,
            ..Settings::default()
        };
        assert!(settings.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_validate_rejects_threshold_out_of_range() {
        let settings = Settings {
            similarity_threshold: 1.5,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let settings: Settings =
            serde_json::from_value(serde_json::json!({"chunkSize": 800, "theme": "dark"})).unwrap();
        assert_eq!(settings.chunk_size, 800);
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.top_k, 5);
        assert!(settings.auto_save);
    }

    #[test]
    fn test_unknown_default_method_fails_to_load() {
        let result: std::result::Result<Settings, _> =
            serde_json::from_value(serde_json::json!({"defaultMethod": "option99"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_set_field_parses_values() {
        let mut settings = Settings::default();
        settings.set_field("top_k", "8").unwrap();
        settings.set_field("defaultMethod", "option7").unwrap();
        settings.set_field("api_endpoint_type", "deepseek").unwrap();
        assert_eq!(settings.top_k, 8);
        assert_eq!(settings.default_method, RagMethod::Reranker);
        assert_eq!(settings.api_endpoint_type, ApiEndpointType::Deepseek);

        assert!(settings.set_field("defaultMethod", "option99").unwrap_err().is_not_found());
        assert!(settings.set_field("colour", "red").unwrap_err().is_validation());
        assert!(settings.set_field("top_k", "many").is_err());
    }
}
