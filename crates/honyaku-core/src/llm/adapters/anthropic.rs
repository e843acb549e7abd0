//! Anthropic adapter

use crate::error::{TranslatorError, TranslatorResult};
use crate::llm::backend::Completion;
use crate::llm::roster::ProviderEntry;
use crate::llm::usage::TokenUsage;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::instrument;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 8192;

/// Anthropic messages call
#[instrument(skip(http_client, entry, prompt), fields(model = %entry.model), level = "debug")]
pub async fn complete(
    http_client: &Client,
    entry: &ProviderEntry,
    prompt: &str,
) -> TranslatorResult<Completion> {
    let url = format!("{}/v1/messages", entry.kind.base_url());

    let request_body = json!({
        "model": entry.model,
        "max_tokens": MAX_TOKENS,
        "messages": [{"role": "user", "content": prompt}],
    });

    let response = http_client
        .post(&url)
        .header("x-api-key", &entry.api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&request_body)
        .send()
        .await
        .map_err(|e| TranslatorError::api(format!("Anthropic request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(super::api_error(response, "Anthropic").await);
    }

    let response_json: Value = response
        .json()
        .await
        .map_err(|e| TranslatorError::api(format!("failed to parse Anthropic response: {}", e)))?;

    parse_response(response_json)
}

/// Extract text blocks and usage from an Anthropic response
fn parse_response(response: Value) -> TranslatorResult<Completion> {
    if response["stop_reason"].as_str() == Some("refusal") {
        return Err(TranslatorError::content_blocked(
            "Anthropic refused the request: stop_reason refusal",
        ));
    }

    let mut text = String::new();
    if let Some(blocks) = response["content"].as_array() {
        for block in blocks {
            if block["type"].as_str() == Some("text") {
                if let Some(chunk) = block["text"].as_str() {
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(chunk);
                }
            }
        }
    }

    let usage = response["usage"].as_object().map(|u| {
        TokenUsage::new(
            u.get("input_tokens").and_then(Value::as_u64).unwrap_or(0),
            u.get("output_tokens").and_then(Value::as_u64).unwrap_or(0),
            None,
        )
    });

    Ok(Completion { text, usage })
}
