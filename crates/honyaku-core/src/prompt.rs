//! Prompt construction
//!
//! Prompts are plain instruction blocks followed by the text to
//! translate, separated by a `---` marker so the model can tell
//! instructions from payload. A user-supplied system prompt replaces the
//! built-in instruction block; `{source_lang}` and `{target_lang}`
//! placeholders in it are substituted with display names.

/// Display name for a language code, used inside prompts.
/// Unknown codes pass through unchanged.
pub fn language_display_name(code: &str) -> &str {
    match code {
        "ja" => "Japanese",
        "ko" => "Korean",
        "en" => "English",
        "zh" => "Chinese",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        other => other,
    }
}

/// Build the prompt for a text chunk
pub fn build_translation_prompt(
    text: &str,
    source_lang: &str,
    target_lang: &str,
    system_override: Option<&str>,
    dictionary_section: Option<&str>,
) -> String {
    let source = language_display_name(source_lang);
    let target = language_display_name(target_lang);

    let instructions = match system_override {
        Some(template) => template
            .replace("{source_lang}", source)
            .replace("{target_lang}", target),
        None => format!(
            "Translate the following text from {source} to {target}.\n\
             \n\
             Guidelines:\n\
             1. Produce natural, fluent {target}.\n\
             2. Preserve the tone and nuance of the original.\n\
             3. Keep any HTML or markup structure intact; translate only the text content.\n\
             4. Keep parenthesized readings like \"漢字(かんじ)\" in the form \"translation(reading)\".\n\
             5. Output only the translation, with no explanations or notes.",
        ),
    };

    let mut prompt = instructions;
    if let Some(section) = dictionary_section {
        prompt.push_str("\n\n");
        prompt.push_str(section.trim_end());
    }
    prompt.push_str("\n\n---\n");
    prompt.push_str(text);
    prompt
}

/// Build the prompt for a filename stem
pub fn build_filename_prompt(stem: &str, source_lang: &str, target_lang: &str) -> String {
    let source = language_display_name(source_lang);
    let target = language_display_name(target_lang);
    format!(
        "Translate the following file name from {source} to {target}.\n\
         Keep it short and usable as a file name.\n\
         Output only the translated name, with no explanations.\n\
         \n\
         File name: {stem}",
    )
}
