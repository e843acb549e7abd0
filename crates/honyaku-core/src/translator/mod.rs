//! Translation engine with multi-provider fallback
//!
//! The engine owns a flattened roster of provider/model endpoints and a
//! cursor into it. Every request goes to the cursor's endpoint; on
//! failure the cursor advances and the request retries, so a working
//! endpoint found mid-document keeps serving the rest of the document.
//! The cursor only ever moves forward; callers reposition it explicitly
//! with [`Translator::set_preferred_endpoint`].

mod classify;

use crate::config::Config;
use crate::dictionary::UserDictionary;
use crate::error::{ExhaustedReason, TranslatorError, TranslatorResult};
use crate::llm::backend::{CompletionBackend, HttpBackend};
use crate::llm::roster::{build_roster, ProviderEntry};
use crate::llm::usage::{TokenUsage, UsageTotals};
use crate::{prompt, text};
use classify::{classify, FailureKind};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

#[cfg(test)]
mod engine_tests;

/// Callback invoked on every endpoint switch:
/// `(previous_label, new_label, reason)`. Must return quickly and must
/// not panic; it runs inline in the retry loop.
pub type SwitchCallback = Box<dyn Fn(&str, &str, &str) + Send + Sync>;

/// The translation engine
pub struct Translator {
    roster: Vec<ProviderEntry>,
    cursor: usize,
    backend: Box<dyn CompletionBackend>,
    on_switch: Option<SwitchCallback>,
    source_lang: String,
    target_lang: String,
    mode: String,
    dictionaries: HashMap<String, UserDictionary>,
    default_dictionary: Option<UserDictionary>,
    system_prompt: Option<String>,
    last_usage: Option<TokenUsage>,
    totals: UsageTotals,
}

impl Translator {
    /// Build an engine from configuration, talking to the real provider
    /// APIs over HTTP.
    pub fn new(config: &Config) -> TranslatorResult<Self> {
        Self::with_backend(config, Box::new(HttpBackend::new()?))
    }

    /// Build an engine with a custom completion backend.
    ///
    /// Fails with a configuration error when no usable provider remains
    /// after filtering out placeholder API keys.
    pub fn with_backend(
        config: &Config,
        backend: Box<dyn CompletionBackend>,
    ) -> TranslatorResult<Self> {
        let roster = build_roster(&config.api)?;
        Ok(Self {
            roster,
            cursor: 0,
            backend,
            on_switch: None,
            source_lang: config.translation.default_source.clone(),
            target_lang: config.translation.default_target.clone(),
            mode: config.translation.mode.clone(),
            dictionaries: HashMap::new(),
            default_dictionary: None,
            system_prompt: None,
            last_usage: None,
            totals: UsageTotals::default(),
        })
    }

    /// Register the endpoint-switch callback
    pub fn set_on_switch(&mut self, callback: SwitchCallback) {
        self.on_switch = Some(callback);
    }

    /// Attach the fallback dictionary, used when no direction-specific
    /// one is loaded.
    pub fn set_dictionary(&mut self, dictionary: UserDictionary) {
        self.default_dictionary = Some(dictionary);
    }

    /// Attach a dictionary for one direction, keyed `"{source}-{target}"`
    /// (e.g. `"ja-ko"`).
    pub fn set_dictionary_for(&mut self, direction: impl Into<String>, dictionary: UserDictionary) {
        self.dictionaries.insert(direction.into(), dictionary);
    }

    /// Replace the built-in prompt instructions. `{source_lang}` and
    /// `{target_lang}` placeholders are substituted per request.
    pub fn set_system_prompt(&mut self, template: impl Into<String>) {
        self.system_prompt = Some(template.into());
    }

    /// Load a system prompt template from a file
    pub fn load_system_prompt(&mut self, path: impl AsRef<Path>) -> TranslatorResult<()> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TranslatorError::Io(format!(
                "failed to read system prompt {}: {}",
                path.display(),
                e
            ))
        })?;
        self.system_prompt = Some(raw);
        Ok(())
    }

    /// Set the translation direction explicitly
    pub fn set_translation_direction(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
    ) {
        self.source_lang = source.into();
        self.target_lang = target.into();
    }

    /// Swap source and target languages
    pub fn swap_direction(&mut self) {
        std::mem::swap(&mut self.source_lang, &mut self.target_lang);
    }

    /// Detect the direction from a text sample.
    ///
    /// A Korean sample maps to Korean-to-Japanese; anything else maps
    /// to a translation into Korean. The engine's own direction is only
    /// updated in `"auto"` mode; in fixed mode the detected pair is
    /// returned for the caller to act on.
    pub fn detect_and_set_direction(&mut self, sample: &str) -> (String, String) {
        let source = text::detect_source_language(sample)
            .map(str::to_string)
            .unwrap_or_else(|| self.source_lang.clone());
        let target = if source == "ko" { "ja" } else { "ko" }.to_string();

        if self.mode == "auto" {
            self.source_lang = source.clone();
            self.target_lang = target.clone();
        }
        (source, target)
    }

    /// Current translation direction as `(source, target)` codes
    pub fn direction(&self) -> (&str, &str) {
        (&self.source_lang, &self.target_lang)
    }

    /// Label of the endpoint the cursor currently points at
    pub fn current_label(&self) -> String {
        self.roster[self.cursor].label()
    }

    /// The full fallback roster in order
    pub fn roster(&self) -> &[ProviderEntry] {
        &self.roster
    }

    /// Reposition the cursor at the endpoint with the given label.
    /// Returns false when no roster entry matches.
    pub fn set_preferred_endpoint(&mut self, label: &str) -> bool {
        match self.roster.iter().position(|entry| entry.label() == label) {
            Some(index) => {
                self.cursor = index;
                true
            }
            None => false,
        }
    }

    /// Token usage of the most recent successful call, if the provider
    /// reported any.
    pub fn last_usage(&self) -> Option<&TokenUsage> {
        self.last_usage.as_ref()
    }

    /// Accumulated token usage across all successful calls
    pub fn usage_totals(&self) -> &UsageTotals {
        &self.totals
    }

    /// Translate one piece of text, walking the fallback roster as
    /// needed. Whitespace-only input is returned unchanged without any
    /// provider call.
    pub async fn translate(&mut self, input: &str) -> TranslatorResult<String> {
        self.request(input, false).await
    }

    /// Translate a sequence of chunks in order.
    ///
    /// `progress` is called with `(current, total)` (1-based) before
    /// each chunk is sent. The first failing chunk aborts the batch.
    pub async fn translate_chunks(
        &mut self,
        chunks: &[String],
        mut progress: impl FnMut(usize, usize),
    ) -> TranslatorResult<Vec<String>> {
        let total = chunks.len();
        let mut translated = Vec::with_capacity(total);
        for (index, chunk) in chunks.iter().enumerate() {
            progress(index + 1, total);
            translated.push(self.request(chunk, false).await?);
        }
        Ok(translated)
    }

    /// Translate a filename, preserving its extension
    pub async fn translate_filename(&mut self, filename: &str) -> TranslatorResult<String> {
        match filename.rsplit_once('.') {
            Some((stem, extension)) if !stem.is_empty() => {
                let translated = self.request(stem, true).await?;
                Ok(format!("{}.{}", translated, extension))
            }
            _ => self.request(filename, true).await,
        }
    }

    async fn request(&mut self, input: &str, is_filename: bool) -> TranslatorResult<String> {
        if input.trim().is_empty() {
            return Ok(input.to_string());
        }

        let prompt = self.build_prompt(input, is_filename);

        loop {
            let entry = self.roster[self.cursor].clone();
            match self.backend.complete(&entry, &prompt).await {
                Ok(completion) => {
                    let trimmed = completion.text.trim();
                    if trimmed.is_empty() {
                        self.advance(FailureKind::Other, "empty response from provider")?;
                        continue;
                    }
                    if let Some(usage) = completion.usage {
                        debug!(
                            endpoint = %entry.label(),
                            input_tokens = usage.input_tokens,
                            output_tokens = usage.output_tokens,
                            "translation call succeeded"
                        );
                        self.totals.record(&usage);
                        self.last_usage = Some(usage);
                    }
                    return Ok(trimmed.to_string());
                }
                Err(error) if error.is_fatal() => return Err(error),
                Err(error) => {
                    let kind = classify(&error);
                    self.advance(kind, &error.to_string())?;
                }
            }
        }
    }

    fn build_prompt(&self, input: &str, is_filename: bool) -> String {
        if is_filename {
            return prompt::build_filename_prompt(input, &self.source_lang, &self.target_lang);
        }

        let direction_key = format!("{}-{}", self.source_lang, self.target_lang);
        let dictionary_section = self
            .dictionaries
            .get(&direction_key)
            .or(self.default_dictionary.as_ref())
            .and_then(UserDictionary::context_prompt);
        prompt::build_translation_prompt(
            input,
            &self.source_lang,
            &self.target_lang,
            self.system_prompt.as_deref(),
            dictionary_section.as_deref(),
        )
    }

    /// Move the cursor past the failed endpoint.
    ///
    /// A content block skips every remaining model of the same provider;
    /// other failures try the immediate next entry. When nothing is
    /// left the roster is exhausted and the cursor stays where it is.
    fn advance(&mut self, kind: FailureKind, reason: &str) -> TranslatorResult<()> {
        let current_kind = self.roster[self.cursor].kind;
        let next = match kind {
            FailureKind::ContentBlock => self
                .roster
                .iter()
                .enumerate()
                .skip(self.cursor + 1)
                .find(|(_, entry)| entry.kind != current_kind)
                .map(|(index, _)| index),
            FailureKind::RateLimit | FailureKind::Other => {
                let candidate = self.cursor + 1;
                (candidate < self.roster.len()).then_some(candidate)
            }
        };

        match next {
            Some(index) => {
                let previous = self.roster[self.cursor].label();
                self.cursor = index;
                let current = self.roster[index].label();
                warn!(
                    from = %previous,
                    to = %current,
                    reason = %reason,
                    "switching endpoint"
                );
                if let Some(callback) = &self.on_switch {
                    callback(&previous, &current, reason);
                }
                Ok(())
            }
            None => {
                let exhausted = match kind {
                    FailureKind::ContentBlock => ExhaustedReason::AllProvidersBlocked,
                    FailureKind::RateLimit => ExhaustedReason::QuotaExhausted,
                    FailureKind::Other => ExhaustedReason::AllModelsFailed,
                };
                warn!(reason = %reason, "fallback roster exhausted");
                Err(TranslatorError::Exhausted(exhausted))
            }
        }
    }
}
