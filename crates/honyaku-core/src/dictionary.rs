//! User dictionary
//!
//! Tab-separated term pairs (`source<TAB>target[<TAB>condition]`) that
//! pin translations for names and recurring vocabulary. The file format
//! tolerates markdown tables: `|`-prefixed rows and table separator
//! lines are skipped, so a dictionary can live inside a readable `.md`
//! file.

use crate::error::{TranslatorError, TranslatorResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::Path;

static TABLE_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[|\-\s:]+$").expect("valid table separator regex"));

/// One pinned term pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Term as it appears in the source text
    pub source: String,
    /// Required translation
    pub target: String,
    /// Optional condition under which the pair applies
    pub condition: Option<String>,
}

impl fmt::Display for DictionaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.condition {
            Some(condition) => write!(f, "{} -> {} ({})", self.source, self.target, condition),
            None => write!(f, "{} -> {}", self.source, self.target),
        }
    }
}

/// An in-memory user dictionary
#[derive(Debug, Clone, Default)]
pub struct UserDictionary {
    entries: Vec<DictionaryEntry>,
}

impl UserDictionary {
    /// Load a dictionary from a tab-separated file
    pub fn load(path: impl AsRef<Path>) -> TranslatorResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TranslatorError::Io(format!(
                "failed to read dictionary {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::parse(&raw))
    }

    /// Parse dictionary text. Blank lines, `#` comments, markdown table
    /// rows and separator lines are skipped; so are malformed lines,
    /// rather than failing the whole load.
    pub fn parse(raw: &str) -> Self {
        let mut entries = Vec::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('|') {
                continue;
            }
            if TABLE_SEPARATOR_RE.is_match(line) {
                continue;
            }

            let mut fields = line.split('\t');
            let source = match fields.next().map(str::trim) {
                Some(s) if !s.is_empty() => s.to_string(),
                _ => continue,
            };
            let target = match fields.next().map(str::trim) {
                Some(t) if !t.is_empty() => t.to_string(),
                _ => continue,
            };
            let condition = fields
                .next()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from);
            entries.push(DictionaryEntry {
                source,
                target,
                condition,
            });
        }
        Self { entries }
    }

    /// Write the dictionary back out in its file format
    pub fn save(&self, path: impl AsRef<Path>) -> TranslatorResult<()> {
        let path = path.as_ref();
        let mut out = String::from("# user dictionary\n# format: source<TAB>target<TAB>condition (optional)\n\n");
        for entry in &self.entries {
            match &entry.condition {
                Some(condition) => {
                    out.push_str(&format!(
                        "{}\t{}\t{}\n",
                        entry.source, entry.target, condition
                    ));
                }
                None => out.push_str(&format!("{}\t{}\n", entry.source, entry.target)),
            }
        }
        std::fs::write(path, out).map_err(|e| {
            TranslatorError::Io(format!(
                "failed to write dictionary {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Append an entry
    pub fn add_entry(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        condition: Option<String>,
    ) {
        self.entries.push(DictionaryEntry {
            source: source.into(),
            target: target.into(),
            condition,
        });
    }

    /// Remove the first entry with the given source term.
    /// Returns false when no entry matches.
    pub fn remove_entry(&mut self, source: &str) -> bool {
        match self.entries.iter().position(|e| e.source == source) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// All loaded entries
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prompt context block listing every pinned translation, or `None`
    /// for an empty dictionary.
    pub fn context_prompt(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }

        let mut block =
            String::from("Use these fixed translations for the following terms:\n");
        for entry in &self.entries {
            block.push_str(&format!("- {}\n", entry));
        }
        Some(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# character names
竜崎\t류자키
夜神月\t야가미 라이토\tfull name, keep order

| source | target |
| ------ | ------ |
malformed line without tab
\t맨앞탭
";

    #[test]
    fn parses_pairs_and_skips_noise_lines() {
        let dict = UserDictionary::parse(SAMPLE);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.entries()[0].source, "竜崎");
        assert_eq!(dict.entries()[0].target, "류자키");
        assert_eq!(
            dict.entries()[1].condition.as_deref(),
            Some("full name, keep order")
        );
    }

    #[test]
    fn context_prompt_lists_every_entry() {
        let dict = UserDictionary::parse(SAMPLE);
        let block = dict.context_prompt().unwrap();
        assert!(block.contains("- 竜崎 -> 류자키"));
        assert!(block.contains("- 夜神月 -> 야가미 라이토 (full name, keep order)"));

        assert!(UserDictionary::default().context_prompt().is_none());
    }

    #[test]
    fn add_remove_round_trip() {
        let mut dict = UserDictionary::default();
        dict.add_entry("先輩", "선배", Some("honorific".to_string()));
        dict.add_entry("お兄ちゃん", "오빠", None);
        assert_eq!(dict.len(), 2);

        assert!(dict.remove_entry("先輩"));
        assert!(!dict.remove_entry("先輩"));
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn save_and_reload_preserves_entries() {
        let mut dict = UserDictionary::default();
        dict.add_entry("漢字", "한자", None);
        dict.add_entry("先輩", "선배", Some("honorific".to_string()));

        let file = tempfile::NamedTempFile::new().unwrap();
        dict.save(file.path()).unwrap();

        let reloaded = UserDictionary::load(file.path()).unwrap();
        assert_eq!(reloaded.entries(), dict.entries());
    }
}
