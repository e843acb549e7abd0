//! Configuration types
//!
//! The configuration file is JSON with optional sections; every section
//! falls back to defaults so a minimal file only needs `api`.

mod api;

pub use api::{ApiConfig, ProviderBlock, PLACEHOLDER_API_KEYS};

use crate::error::{TranslatorError, TranslatorResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Provider roster configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Translation direction and output naming
    #[serde(default)]
    pub translation: TranslationConfig,
    /// User dictionary settings
    #[serde(default)]
    pub dictionary: DictionaryConfig,
    /// Text chunking settings
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Ruby annotation handling
    #[serde(default)]
    pub ruby: RubyConfig,
    /// Prompt resource paths
    #[serde(default)]
    pub prompts: PromptsConfig,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> TranslatorResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TranslatorError::Io(format!("failed to read config {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            TranslatorError::Json(format!("invalid config {}: {}", path.display(), e))
        })?;
        Ok(config)
    }
}

/// Translation direction and output naming
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// "auto" lets language detection pick the direction
    #[serde(default = "TranslationConfig::default_mode")]
    pub mode: String,
    /// Default source language code
    #[serde(default = "TranslationConfig::default_source")]
    pub default_source: String,
    /// Default target language code
    #[serde(default = "TranslationConfig::default_target")]
    pub default_target: String,
    /// Output filename suffix when no per-language suffix applies
    #[serde(default = "TranslationConfig::default_suffix")]
    pub suffix: String,
    /// Suffix used when the target language is Korean
    #[serde(default)]
    pub suffix_ko: Option<String>,
    /// Suffix used when the target language is Japanese
    #[serde(default)]
    pub suffix_ja: Option<String>,
    /// Also translate the output filename
    #[serde(default)]
    pub translate_filename: bool,
}

impl TranslationConfig {
    fn default_mode() -> String {
        "auto".to_string()
    }

    fn default_source() -> String {
        "ja".to_string()
    }

    fn default_target() -> String {
        "ko".to_string()
    }

    fn default_suffix() -> String {
        "(k)".to_string()
    }

    /// Suffix for a given target language, falling back to the generic one
    pub fn suffix_for_target(&self, target: &str) -> &str {
        let specific = match target {
            "ko" => self.suffix_ko.as_deref(),
            "ja" => self.suffix_ja.as_deref(),
            _ => None,
        };
        specific.unwrap_or(&self.suffix)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            mode: Self::default_mode(),
            default_source: Self::default_source(),
            default_target: Self::default_target(),
            suffix: Self::default_suffix(),
            suffix_ko: None,
            suffix_ja: None,
            translate_filename: false,
        }
    }
}

/// User dictionary settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Whether the dictionary context is injected into prompts
    #[serde(default)]
    pub enabled: bool,
    /// Path to the tab-separated dictionary file
    #[serde(default)]
    pub path: Option<String>,
}

/// Text chunking settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum characters per translation chunk
    #[serde(default = "ChunkingConfig::default_max_chars")]
    pub max_chars: usize,
}

impl ChunkingConfig {
    fn default_max_chars() -> usize {
        3000
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: Self::default_max_chars(),
        }
    }
}

/// Ruby annotation handling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RubyConfig {
    /// Rewrite `<ruby>base<rt>reading</rt></ruby>` to `base(reading)`
    /// before translation
    #[serde(default = "RubyConfig::default_convert")]
    pub convert_to_parentheses: bool,
    /// Drop the reading instead of keeping it in parentheses
    #[serde(default)]
    pub keep_original_reading: bool,
}

impl RubyConfig {
    fn default_convert() -> bool {
        true
    }
}

impl Default for RubyConfig {
    fn default() -> Self {
        Self {
            convert_to_parentheses: Self::default_convert(),
            keep_original_reading: false,
        }
    }
}

/// Prompt resource paths
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// Path to a dictionary file injected into prompts
    #[serde(default)]
    pub dictionary: Option<String>,
    /// Path to a system prompt override file
    #[serde(default)]
    pub system: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let config: Config = serde_json::from_str(r#"{"api": {"provider": "gemini", "model": "gemini-2.5-flash", "api_key": "k"}}"#).unwrap();
        assert_eq!(config.translation.mode, "auto");
        assert_eq!(config.translation.default_source, "ja");
        assert_eq!(config.translation.default_target, "ko");
        assert_eq!(config.chunking.max_chars, 3000);
        assert!(config.ruby.convert_to_parentheses);
        assert!(!config.dictionary.enabled);
    }

    #[test]
    fn suffix_prefers_language_specific_value() {
        let translation = TranslationConfig {
            suffix_ko: Some("(한)".to_string()),
            ..Default::default()
        };
        assert_eq!(translation.suffix_for_target("ko"), "(한)");
        assert_eq!(translation.suffix_for_target("ja"), "(k)");
        assert_eq!(translation.suffix_for_target("en"), "(k)");
    }
}
