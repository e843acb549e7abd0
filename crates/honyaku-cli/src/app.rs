//! The file-translation pipeline: read, detect, prepare, chunk,
//! translate, write.

use crate::args::Args;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use honyaku_core::{text, Config, Translator, UserDictionary};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Extensions the pipeline will translate
const SUPPORTED_EXTENSIONS: &[&str] = &[
    "txt", "md", "html", "htm", "xml", "json", "csv", "srt", "vtt", "ass", "tex", "rst",
];

/// Characters sampled from the start of a file for language detection
const DETECTION_SAMPLE_CHARS: usize = 2000;

/// Sidecar file next to the config that pins the starting endpoint
const MODEL_PREFERENCE_FILE: &str = "model_preference.json";

#[derive(Debug, Default, Deserialize)]
struct ModelPreference {
    #[serde(default)]
    preferred_model: String,
}

pub async fn run(args: Args) -> Result<()> {
    let config = Config::load(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    let config_dir = args
        .config
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let mut translator = Translator::new(&config).context("failed to initialize translator")?;
    translator.set_on_switch(Box::new(|from, to, reason| {
        eprintln!(
            "  {} {}: {} -> {}",
            "(!)".yellow(),
            reason,
            from.dimmed(),
            to.bold()
        );
    }));

    apply_model_preference(&mut translator, &config_dir);
    load_prompt_resources(&mut translator, &config, &config_dir)?;

    if let Some((source, target)) = args.fixed_direction() {
        translator.set_translation_direction(source, target);
        println!("{} {} -> {}", "[direction]".cyan(), source, target);
    }
    println!("{} {}", "[model]".cyan(), translator.current_label());

    let mut succeeded = 0usize;
    let mut failed = 0usize;

    for (index, file) in args.files.iter().enumerate() {
        println!(
            "\n({}/{}) {}",
            index + 1,
            args.files.len(),
            file.display().to_string().bold()
        );
        match translate_file(&mut translator, &config, &args, file).await {
            Ok(output) => {
                succeeded += 1;
                println!("  {} {}", "=>".green(), output.display());
            }
            Err(error) => {
                failed += 1;
                eprintln!("  {} {:#}", "(X)".red(), error);
            }
        }
    }

    let totals = translator.usage_totals();
    if totals.total() > 0 {
        println!(
            "\n{} {} tokens (input {}, output {})",
            "[usage]".cyan(),
            totals.total(),
            totals.input_tokens,
            totals.output_tokens
        );
    }
    println!(
        "{} {} succeeded, {} failed",
        "[done]".cyan(),
        succeeded,
        failed
    );

    if succeeded == 0 && failed > 0 {
        bail!("no file was translated");
    }
    Ok(())
}

/// Apply the saved endpoint preference, if a sidecar file exists.
/// A stale or unreadable preference is ignored rather than fatal.
fn apply_model_preference(translator: &mut Translator, config_dir: &Path) {
    let path = config_dir.join(MODEL_PREFERENCE_FILE);
    let Ok(raw) = std::fs::read_to_string(&path) else {
        return;
    };
    let preference: ModelPreference = match serde_json::from_str(&raw) {
        Ok(p) => p,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "ignoring malformed model preference");
            return;
        }
    };
    if !preference.preferred_model.is_empty() {
        if translator.set_preferred_endpoint(&preference.preferred_model) {
            println!("{} {}", "[preference]".cyan(), preference.preferred_model);
        } else {
            tracing::warn!(
                preferred = %preference.preferred_model,
                "preferred endpoint is not in the configured roster"
            );
        }
    }
}

/// Load the user dictionaries and system prompt named in the config.
/// Paths are resolved relative to the config file.
fn load_prompt_resources(
    translator: &mut Translator,
    config: &Config,
    config_dir: &Path,
) -> Result<()> {
    let dictionary_path = config
        .prompts
        .dictionary
        .as_deref()
        .or_else(|| config.dictionary.path.as_deref().filter(|_| config.dictionary.enabled));
    if let Some(relative) = dictionary_path {
        let path = config_dir.join(relative);
        if path.exists() {
            let dictionary = UserDictionary::load(&path)?;
            println!("{} {} entries", "[dictionary]".cyan(), dictionary.len());
            translator.set_dictionary(dictionary);
        }
    }

    load_pair_dictionaries(translator, &config_dir.join("dictionaries"))?;

    if let Some(relative) = config.prompts.system.as_deref() {
        let path = config_dir.join(relative);
        if path.exists() {
            translator.load_system_prompt(&path)?;
            println!("{} {}", "[prompt]".cyan(), path.display());
        }
    }
    Ok(())
}

/// Load direction-specific dictionaries from a `dictionaries/` directory
/// next to the config: `ja-ko.md` serves Japanese-to-Korean only.
fn load_pair_dictionaries(translator: &mut Translator, dir: &Path) -> Result<()> {
    let Ok(read_dir) = std::fs::read_dir(dir) else {
        return Ok(());
    };
    for entry in read_dir.flatten() {
        let path = entry.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !is_direction_key(stem) {
            continue;
        }
        let dictionary = UserDictionary::load(&path)?;
        println!(
            "{} {} ({} entries)",
            "[dictionary]".cyan(),
            stem,
            dictionary.len()
        );
        translator.set_dictionary_for(stem, dictionary);
    }
    Ok(())
}

/// Whether a file stem looks like a `"{source}-{target}"` direction key
fn is_direction_key(stem: &str) -> bool {
    match stem.split_once('-') {
        Some((source, target)) => {
            let code = |s: &str| s.len() == 2 && s.chars().all(|c| c.is_ascii_lowercase());
            code(source) && code(target)
        }
        None => false,
    }
}

async fn translate_file(
    translator: &mut Translator,
    config: &Config,
    args: &Args,
    path: &Path,
) -> Result<PathBuf> {
    if !is_supported(path) {
        bail!("unsupported file type");
    }

    let raw = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let content = String::from_utf8_lossy(&raw).into_owned();
    println!("  - {} chars", content.chars().count());

    if args.fixed_direction().is_none() {
        let sample: String = content.chars().take(DETECTION_SAMPLE_CHARS).collect();
        let (source, target) = translator.detect_and_set_direction(&sample);
        println!("  - detected: {} -> {}", source, target);
    }

    let content = if config.ruby.convert_to_parentheses {
        text::convert_ruby_to_parentheses(&content, !config.ruby.keep_original_reading)
    } else {
        content
    };

    let chunks = text::split_text_into_chunks(&content, config.chunking.max_chars);
    let bar = ProgressBar::new(chunks.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {msg}")
            .context("invalid progress template")?,
    );

    let mut translated = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        let result = translator.translate(chunk).await?;
        if let Some(usage) = translator.last_usage() {
            bar.set_message(format!("{} tokens", usage.total_tokens));
        }
        bar.inc(1);
        translated.push(result);
    }
    bar.finish_and_clear();

    let output = output_path_for(translator, config, path).await?;
    std::fs::write(&output, translated.join("\n\n"))
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(output)
}

/// Decide the output path: optionally translate the filename, then
/// insert the target-language suffix before the extension.
async fn output_path_for(
    translator: &mut Translator,
    config: &Config,
    input: &Path,
) -> Result<PathBuf> {
    let target = translator.direction().1.to_string();
    let suffix = config.translation.suffix_for_target(&target).to_string();

    let filename = input
        .file_name()
        .and_then(|name| name.to_str())
        .context("invalid file name")?;

    let name = if config.translation.translate_filename && text::contains_japanese(filename) {
        translator.translate_filename(filename).await?
    } else {
        filename.to_string()
    };

    Ok(text::output_path_with_suffix(
        &input.with_file_name(name),
        &suffix,
    ))
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extensions_are_case_insensitive() {
        assert!(is_supported(Path::new("novel.txt")));
        assert!(is_supported(Path::new("subs.SRT")));
        assert!(is_supported(Path::new("doc.Md")));
        assert!(!is_supported(Path::new("image.png")));
        assert!(!is_supported(Path::new("no_extension")));
    }

    #[test]
    fn direction_keys_are_two_letter_pairs() {
        assert!(is_direction_key("ja-ko"));
        assert!(is_direction_key("ko-ja"));
        assert!(!is_direction_key("ja_ko"));
        assert!(!is_direction_key("jpn-kor"));
        assert!(!is_direction_key("notes"));
    }

    #[test]
    fn model_preference_parses_and_tolerates_extras() {
        let pref: ModelPreference =
            serde_json::from_str(r#"{"preferred_model": "gemini:g1", "saved_at": "2025-01-01"}"#)
                .unwrap();
        assert_eq!(pref.preferred_model, "gemini:g1");

        let empty: ModelPreference = serde_json::from_str("{}").unwrap();
        assert!(empty.preferred_model.is_empty());
    }
}
