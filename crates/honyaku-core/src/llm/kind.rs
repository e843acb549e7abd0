//! Supported provider kinds

use crate::error::TranslatorError;
use serde::{Deserialize, Serialize};

/// Supported LLM providers.
///
/// This is a closed set: configuration naming anything else is rejected
/// up front rather than dispatched dynamically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini
    Gemini,
    /// OpenAI (Chat Completions)
    OpenAi,
    /// Anthropic (Messages)
    Anthropic,
}

impl ProviderKind {
    /// Get the provider name as a string
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    /// Default API base URL for this provider
    pub fn base_url(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Anthropic => "https://api.anthropic.com",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = TranslatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            other => Err(TranslatorError::config(format!(
                "unknown provider '{}' (expected gemini, openai or anthropic)",
                other
            ))),
        }
    }
}
