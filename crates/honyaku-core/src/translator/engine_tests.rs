use super::*;
use crate::config::{ApiConfig, ProviderBlock};
use crate::llm::backend::Completion;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Backend that plays back a scripted sequence of results and records
/// which endpoint each call went to.
struct ScriptedBackend {
    script: Mutex<VecDeque<TranslatorResult<Completion>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedBackend {
    fn new(script: Vec<TranslatorResult<Completion>>) -> (Self, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let backend = Self {
            script: Mutex::new(script.into()),
            calls: Arc::clone(&calls),
        };
        (backend, calls)
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(
        &self,
        entry: &ProviderEntry,
        _prompt: &str,
    ) -> TranslatorResult<Completion> {
        self.calls.lock().unwrap().push(entry.label());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TranslatorError::api("script ran out of responses")))
    }
}

fn ok(text: &str) -> TranslatorResult<Completion> {
    Ok(Completion {
        text: text.to_string(),
        usage: None,
    })
}

fn ok_with_usage(text: &str, input: u64, output: u64) -> TranslatorResult<Completion> {
    Ok(Completion {
        text: text.to_string(),
        usage: Some(TokenUsage::new(input, output, None)),
    })
}

fn config_with(blocks: Vec<(&str, &str, Vec<&str>)>) -> Config {
    let providers = blocks
        .into_iter()
        .map(|(name, model, fallbacks)| ProviderBlock {
            name: name.to_string(),
            model: model.to_string(),
            fallback_models: fallbacks.into_iter().map(String::from).collect(),
            api_key: "test-key".to_string(),
        })
        .collect();
    Config {
        api: ApiConfig {
            providers: Some(providers),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn translator_with(
    blocks: Vec<(&str, &str, Vec<&str>)>,
    script: Vec<TranslatorResult<Completion>>,
) -> (Translator, Arc<Mutex<Vec<String>>>) {
    let config = config_with(blocks);
    let (backend, calls) = ScriptedBackend::new(script);
    let translator = Translator::with_backend(&config, Box::new(backend)).unwrap();
    (translator, calls)
}

#[tokio::test]
async fn first_endpoint_success_does_not_switch() {
    let (mut translator, calls) = translator_with(
        vec![("gemini", "g1", vec!["g2"])],
        vec![ok("안녕하세요")],
    );

    let result = translator.translate("こんにちは").await.unwrap();
    assert_eq!(result, "안녕하세요");
    assert_eq!(calls.lock().unwrap().as_slice(), ["gemini:g1"]);
    assert_eq!(translator.current_label(), "gemini:g1");
}

#[tokio::test]
async fn rate_limits_walk_every_entry_then_exhaust_as_quota() {
    let (mut translator, calls) = translator_with(
        vec![("gemini", "g1", vec!["g2"]), ("openai", "o1", vec![])],
        vec![
            Err(TranslatorError::rate_limited("429")),
            Err(TranslatorError::rate_limited("429")),
            Err(TranslatorError::rate_limited("429")),
        ],
    );

    let err = translator.translate("text").await.unwrap_err();
    assert!(matches!(
        err,
        TranslatorError::Exhausted(ExhaustedReason::QuotaExhausted)
    ));
    // One attempt per roster entry, in roster order.
    assert_eq!(
        calls.lock().unwrap().as_slice(),
        ["gemini:g1", "gemini:g2", "openai:o1"]
    );
}

#[tokio::test]
async fn content_block_skips_remaining_models_of_the_provider() {
    let (mut translator, calls) = translator_with(
        vec![("gemini", "g1", vec!["g2"]), ("openai", "o1", vec![])],
        vec![
            Err(TranslatorError::content_blocked("PROHIBITED_CONTENT")),
            ok("done"),
        ],
    );

    let result = translator.translate("text").await.unwrap();
    assert_eq!(result, "done");
    // gemini:g2 is never tried: a block poisons the whole provider.
    assert_eq!(calls.lock().unwrap().as_slice(), ["gemini:g1", "openai:o1"]);
}

#[tokio::test]
async fn content_block_with_no_other_provider_exhausts_as_blocked() {
    let (mut translator, calls) = translator_with(
        vec![("gemini", "g1", vec!["g2"])],
        vec![Err(TranslatorError::content_blocked("SAFETY"))],
    );

    let err = translator.translate("text").await.unwrap_err();
    assert!(matches!(
        err,
        TranslatorError::Exhausted(ExhaustedReason::AllProvidersBlocked)
    ));
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn generic_failure_on_the_last_entry_exhausts_as_all_failed() {
    let (mut translator, _calls) = translator_with(
        vec![("gemini", "g1", vec!["g2"])],
        vec![
            Err(TranslatorError::rate_limited("429")),
            Err(TranslatorError::api("connection reset")),
        ],
    );

    let err = translator.translate("text").await.unwrap_err();
    // The reason reflects the failure that hit the end of the roster.
    assert!(matches!(
        err,
        TranslatorError::Exhausted(ExhaustedReason::AllModelsFailed)
    ));
}

#[tokio::test]
async fn cursor_persists_across_calls() {
    let (mut translator, calls) = translator_with(
        vec![("gemini", "g1", vec!["g2"])],
        vec![
            Err(TranslatorError::rate_limited("429")),
            ok("첫 번째"),
            ok("두 번째"),
        ],
    );

    translator.translate("one").await.unwrap();
    translator.translate("two").await.unwrap();
    // The second call goes straight to g2 without retrying g1.
    assert_eq!(
        calls.lock().unwrap().as_slice(),
        ["gemini:g1", "gemini:g2", "gemini:g2"]
    );
}

#[tokio::test]
async fn switch_callback_sees_labels_and_reason() {
    let (mut translator, _calls) = translator_with(
        vec![("gemini", "g1", vec!["g2"])],
        vec![Err(TranslatorError::rate_limited("quota hit")), ok("ok")],
    );

    let switches: Arc<Mutex<Vec<(String, String, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&switches);
    translator.set_on_switch(Box::new(move |from, to, reason| {
        recorded
            .lock()
            .unwrap()
            .push((from.to_string(), to.to_string(), reason.to_string()));
    }));

    translator.translate("text").await.unwrap();

    let switches = switches.lock().unwrap();
    assert_eq!(switches.len(), 1);
    assert_eq!(switches[0].0, "gemini:g1");
    assert_eq!(switches[0].1, "gemini:g2");
    assert!(switches[0].2.contains("quota hit"));
}

#[tokio::test]
async fn whitespace_input_short_circuits_without_a_call() {
    let (mut translator, calls) =
        translator_with(vec![("gemini", "g1", vec![])], vec![]);

    let result = translator.translate("  \n\t ").await.unwrap();
    assert_eq!(result, "  \n\t ");
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_response_text_advances_like_a_failure() {
    let (mut translator, calls) = translator_with(
        vec![("gemini", "g1", vec!["g2"])],
        vec![ok("   "), ok("result")],
    );

    let result = translator.translate("text").await.unwrap();
    assert_eq!(result, "result");
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn preferred_endpoint_repositions_the_cursor() {
    let (mut translator, calls) = translator_with(
        vec![("gemini", "g1", vec!["g2"]), ("openai", "o1", vec![])],
        vec![ok("ok")],
    );

    assert!(translator.set_preferred_endpoint("openai:o1"));
    assert!(!translator.set_preferred_endpoint("openai:no-such-model"));

    translator.translate("text").await.unwrap();
    assert_eq!(calls.lock().unwrap().as_slice(), ["openai:o1"]);
}

#[tokio::test]
async fn usage_accumulates_across_successful_calls() {
    let (mut translator, _calls) = translator_with(
        vec![("gemini", "g1", vec![])],
        vec![ok_with_usage("a", 100, 40), ok_with_usage("b", 10, 5)],
    );

    translator.translate("one").await.unwrap();
    assert_eq!(translator.last_usage().unwrap().total_tokens, 140);

    translator.translate("two").await.unwrap();
    assert_eq!(translator.last_usage().unwrap().total_tokens, 15);
    assert_eq!(translator.usage_totals().input_tokens, 110);
    assert_eq!(translator.usage_totals().output_tokens, 45);
}

#[tokio::test]
async fn chunk_progress_is_one_based_and_ordered() {
    let (mut translator, _calls) = translator_with(
        vec![("gemini", "g1", vec![])],
        vec![ok("1"), ok("2"), ok("3")],
    );

    let chunks = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let mut seen = Vec::new();
    let translated = translator
        .translate_chunks(&chunks, |current, total| seen.push((current, total)))
        .await
        .unwrap();

    assert_eq!(translated, vec!["1", "2", "3"]);
    assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
}

#[tokio::test]
async fn chunk_order_survives_a_mid_sequence_switch() {
    let (mut translator, calls) = translator_with(
        vec![("gemini", "g1", vec!["g2"])],
        vec![
            ok("1"),
            Err(TranslatorError::rate_limited("429")),
            ok("2"),
            ok("3"),
        ],
    );

    let chunks = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let translated = translator
        .translate_chunks(&chunks, |_, _| {})
        .await
        .unwrap();

    assert_eq!(translated, vec!["1", "2", "3"]);
    assert_eq!(
        calls.lock().unwrap().as_slice(),
        ["gemini:g1", "gemini:g1", "gemini:g2", "gemini:g2"]
    );
}

#[tokio::test]
async fn filename_translation_preserves_the_extension() {
    let (mut translator, _calls) = translator_with(
        vec![("gemini", "g1", vec![])],
        vec![ok("고양이 이야기")],
    );

    let translated = translator.translate_filename("猫の話.txt").await.unwrap();
    assert_eq!(translated, "고양이 이야기.txt");
}

#[tokio::test]
async fn swap_direction_round_trips() {
    let (mut translator, _calls) = translator_with(vec![("gemini", "g1", vec![])], vec![]);

    assert_eq!(translator.direction(), ("ja", "ko"));
    translator.swap_direction();
    assert_eq!(translator.direction(), ("ko", "ja"));
    translator.swap_direction();
    assert_eq!(translator.direction(), ("ja", "ko"));
}

#[tokio::test]
async fn detection_updates_direction_only_in_auto_mode() {
    let (mut translator, _calls) = translator_with(vec![("gemini", "g1", vec![])], vec![]);
    let (source, target) = translator.detect_and_set_direction("한국어 문장입니다.");
    assert_eq!((source.as_str(), target.as_str()), ("ko", "ja"));
    assert_eq!(translator.direction(), ("ko", "ja"));

    let mut config = config_with(vec![("gemini", "g1", vec![])]);
    config.translation.mode = "fixed".to_string();
    let (backend, _) = ScriptedBackend::new(vec![]);
    let mut fixed = Translator::with_backend(&config, Box::new(backend)).unwrap();

    let (source, target) = fixed.detect_and_set_direction("한국어 문장입니다.");
    // Detection still reports the pair, but fixed mode keeps ja -> ko.
    assert_eq!((source.as_str(), target.as_str()), ("ko", "ja"));
    assert_eq!(fixed.direction(), ("ja", "ko"));
}
