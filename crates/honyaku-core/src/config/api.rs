//! Provider roster configuration
//!
//! Two shapes are accepted. The current shape lists provider blocks:
//!
//! ```json
//! {"providers": [{"name": "gemini", "model": "gemini-2.5-flash",
//!                 "fallback_models": ["gemini-2.5-flash-lite"],
//!                 "api_key": "..."}]}
//! ```
//!
//! The legacy shape is a single flat block with the same fields under
//! `provider`/`model`/`fallback_models`/`api_key`.

use serde::{Deserialize, Serialize};

/// Placeholder credentials shipped in config templates. Blocks carrying
/// one of these are treated as unconfigured and skipped.
pub const PLACEHOLDER_API_KEYS: &[&str] = &[
    "YOUR_API_KEY_HERE",
    "YOUR_OPENAI_API_KEY",
    "YOUR_ANTHROPIC_API_KEY",
];

/// One configured provider: a primary model plus ordered fallbacks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderBlock {
    /// Provider name (gemini, openai, anthropic)
    pub name: String,
    /// Primary model identifier
    pub model: String,
    /// Fallback models, tried in order after the primary
    #[serde(default)]
    pub fallback_models: Vec<String>,
    /// API key for this provider
    #[serde(default)]
    pub api_key: String,
}

impl ProviderBlock {
    /// Whether this block carries a usable credential
    pub fn has_usable_key(&self) -> bool {
        !self.api_key.is_empty() && !PLACEHOLDER_API_KEYS.contains(&self.api_key.as_str())
    }
}

/// The `api` section, accepting both roster shapes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Current shape: ordered provider blocks
    #[serde(default)]
    pub providers: Option<Vec<ProviderBlock>>,

    // Legacy flat shape
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub fallback_models: Option<Vec<String>>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ApiConfig {
    /// Normalize both shapes into an ordered block list.
    ///
    /// When `providers` is present it wins; the legacy flat fields are
    /// only consulted otherwise.
    pub fn provider_blocks(&self) -> Vec<ProviderBlock> {
        if let Some(blocks) = &self.providers {
            return blocks.clone();
        }

        match (&self.provider, &self.model) {
            (Some(name), Some(model)) => vec![ProviderBlock {
                name: name.clone(),
                model: model.clone(),
                fallback_models: self.fallback_models.clone().unwrap_or_default(),
                api_key: self.api_key.clone().unwrap_or_default(),
            }],
            _ => Vec::new(),
        }
    }

    /// Whether any configured block carries a real credential
    pub fn has_usable_key(&self) -> bool {
        self.provider_blocks().iter().any(|b| b.has_usable_key())
    }
}
