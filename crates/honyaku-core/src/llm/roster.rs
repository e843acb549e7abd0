//! Flattened provider/model roster
//!
//! The roster is the fallback order: the first configured provider's
//! primary model, then its fallbacks, then the next provider's primary,
//! and so on.

use crate::config::ApiConfig;
use crate::error::{TranslatorError, TranslatorResult};
use crate::llm::kind::ProviderKind;
use std::str::FromStr;

/// One endpoint in the fallback roster. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEntry {
    /// Which provider API this entry calls
    pub kind: ProviderKind,
    /// Model identifier passed to the provider
    pub model: String,
    /// Credential for this provider
    pub api_key: String,
}

impl ProviderEntry {
    /// Create a new entry
    pub fn new(kind: ProviderKind, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            kind,
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Human-readable endpoint label, e.g. `gemini:gemini-2.5-flash`
    pub fn label(&self) -> String {
        format!("{}:{}", self.kind, self.model)
    }
}

/// Build the flat fallback roster from configuration.
///
/// Provider blocks without a usable credential are skipped entirely.
/// Returns a configuration error when nothing usable remains or when a
/// block names an unknown provider.
pub fn build_roster(api: &ApiConfig) -> TranslatorResult<Vec<ProviderEntry>> {
    let mut roster = Vec::new();

    for block in api.provider_blocks() {
        if !block.has_usable_key() {
            tracing::debug!(provider = %block.name, "skipping provider without usable API key");
            continue;
        }

        let kind = ProviderKind::from_str(&block.name)?;

        roster.push(ProviderEntry::new(kind, &block.model, &block.api_key));
        for model in &block.fallback_models {
            roster.push(ProviderEntry::new(kind, model, &block.api_key));
        }
    }

    if roster.is_empty() {
        return Err(TranslatorError::config(
            "no usable providers configured; set an API key in the config file",
        ));
    }

    Ok(roster)
}
