//! Backend seam between the engine and the provider APIs

use crate::error::{TranslatorError, TranslatorResult};
use crate::llm::adapters;
use crate::llm::kind::ProviderKind;
use crate::llm::roster::ProviderEntry;
use crate::llm::usage::TokenUsage;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Result of one provider call
#[derive(Debug, Clone, Default)]
pub struct Completion {
    /// Extracted response text (may be empty; the engine treats an empty
    /// text as a failure)
    pub text: String,
    /// Token counts when the provider reported them
    pub usage: Option<TokenUsage>,
}

/// Unified interface for issuing one completion call against a roster
/// entry. The engine walks the roster through this seam, which keeps the
/// fallback state machine testable without a network.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Issue one completion request for `entry` with the given prompt
    async fn complete(&self, entry: &ProviderEntry, prompt: &str) -> TranslatorResult<Completion>;
}

/// Production backend: one HTTP client, routed by provider kind
pub struct HttpBackend {
    http_client: Client,
}

impl HttpBackend {
    /// Default end-to-end request timeout
    const REQUEST_TIMEOUT_SECS: u64 = 120;

    /// Create the backend.
    ///
    /// Failing to construct the HTTP client means no provider can ever be
    /// called, so this is a fatal configuration error rather than
    /// something to retry per entry.
    pub fn new() -> TranslatorResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(Self::REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                TranslatorError::config(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl CompletionBackend for HttpBackend {
    async fn complete(&self, entry: &ProviderEntry, prompt: &str) -> TranslatorResult<Completion> {
        match entry.kind {
            ProviderKind::Gemini => {
                adapters::gemini::complete(&self.http_client, entry, prompt).await
            }
            ProviderKind::OpenAi => {
                adapters::openai::complete(&self.http_client, entry, prompt).await
            }
            ProviderKind::Anthropic => {
                adapters::anthropic::complete(&self.http_client, entry, prompt).await
            }
        }
    }
}
