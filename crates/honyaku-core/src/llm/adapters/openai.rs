//! OpenAI adapter

use crate::error::{TranslatorError, TranslatorResult};
use crate::llm::backend::Completion;
use crate::llm::roster::ProviderEntry;
use crate::llm::usage::TokenUsage;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::instrument;

/// OpenAI chat completion call
#[instrument(skip(http_client, entry, prompt), fields(model = %entry.model), level = "debug")]
pub async fn complete(
    http_client: &Client,
    entry: &ProviderEntry,
    prompt: &str,
) -> TranslatorResult<Completion> {
    let url = format!("{}/chat/completions", entry.kind.base_url());

    let request_body = json!({
        "model": entry.model,
        "messages": [{"role": "user", "content": prompt}],
    });

    let response = http_client
        .post(&url)
        .bearer_auth(&entry.api_key)
        .json(&request_body)
        .send()
        .await
        .map_err(|e| TranslatorError::api(format!("OpenAI request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(super::api_error(response, "OpenAI").await);
    }

    let response_json: Value = response
        .json()
        .await
        .map_err(|e| TranslatorError::api(format!("failed to parse OpenAI response: {}", e)))?;

    parse_response(response_json)
}

fn parse_response(response: Value) -> TranslatorResult<Completion> {
    let choice = &response["choices"][0];

    // A content_filter stop means the model was cut off by policy even
    // though the HTTP call succeeded.
    if choice["finish_reason"].as_str() == Some("content_filter") {
        return Err(TranslatorError::content_blocked(
            "OpenAI stopped the response: finish_reason content_filter",
        ));
    }

    let text = choice["message"]["content"].as_str().unwrap_or("").to_string();

    let usage = response["usage"].as_object().map(|u| {
        TokenUsage::new(
            u.get("prompt_tokens").and_then(Value::as_u64).unwrap_or(0),
            u.get("completion_tokens").and_then(Value::as_u64).unwrap_or(0),
            u.get("total_tokens").and_then(Value::as_u64),
        )
    });

    Ok(Completion { text, usage })
}
