//! Google Gemini adapter

use crate::error::{TranslatorError, TranslatorResult};
use crate::llm::backend::Completion;
use crate::llm::roster::ProviderEntry;
use crate::llm::usage::TokenUsage;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::instrument;

/// Gemini generateContent call
#[instrument(skip(http_client, entry, prompt), fields(model = %entry.model), level = "debug")]
pub async fn complete(
    http_client: &Client,
    entry: &ProviderEntry,
    prompt: &str,
) -> TranslatorResult<Completion> {
    let url = format!(
        "{}/v1beta/models/{}:generateContent?key={}",
        entry.kind.base_url(),
        entry.model,
        entry.api_key
    );

    let request_body = json!({
        "contents": [{
            "parts": [{"text": prompt}]
        }]
    });

    let response = http_client
        .post(&url)
        .json(&request_body)
        .send()
        .await
        .map_err(|e| {
            TranslatorError::api(format!(
                "Gemini request failed: {}",
                super::sanitize_error_text(&e.to_string())
            ))
        })?;

    if !response.status().is_success() {
        return Err(super::api_error(response, "Gemini").await);
    }

    let response_json: Value = response
        .json()
        .await
        .map_err(|e| TranslatorError::api(format!("failed to parse Gemini response: {}", e)))?;

    parse_response(response_json)
}

/// Extract text and usage from a Gemini response.
///
/// A response can succeed at the HTTP level while the content was still
/// refused: `promptFeedback.blockReason` or a candidate finishing with
/// `SAFETY`/`PROHIBITED_CONTENT` both mean a content block.
fn parse_response(response: Value) -> TranslatorResult<Completion> {
    if let Some(reason) = response["promptFeedback"]["blockReason"].as_str() {
        return Err(TranslatorError::content_blocked(format!(
            "Gemini blocked the prompt: {}",
            reason
        )));
    }

    let candidate = &response["candidates"][0];

    if let Some(finish) = candidate["finishReason"].as_str() {
        if matches!(finish, "SAFETY" | "PROHIBITED_CONTENT" | "BLOCKLIST") {
            return Err(TranslatorError::content_blocked(format!(
                "Gemini refused to answer: finishReason {}",
                finish
            )));
        }
    }

    let mut text = String::new();
    if let Some(parts) = candidate["content"]["parts"].as_array() {
        for part in parts {
            if let Some(chunk) = part["text"].as_str() {
                text.push_str(chunk);
            }
        }
    }

    let usage = response["usageMetadata"].as_object().map(|meta| {
        TokenUsage::new(
            meta.get("promptTokenCount").and_then(Value::as_u64).unwrap_or(0),
            meta.get("candidatesTokenCount").and_then(Value::as_u64).unwrap_or(0),
            meta.get("totalTokenCount").and_then(Value::as_u64),
        )
    });

    Ok(Completion { text, usage })
}
