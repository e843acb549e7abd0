//! Chunking for long documents
//!
//! Long texts are split before translation so each request stays inside
//! model context limits. Splitting prefers paragraph boundaries; a
//! paragraph that is itself too long falls back to sentence boundaries.
//! Limits are measured in characters, not bytes, so CJK text is not
//! penalized threefold.

use once_cell::sync::Lazy;
use regex::Regex;

static PARAGRAPH_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid paragraph split regex"));

/// Sentence-ending characters for Japanese, Korean, and Western text
const SENTENCE_ENDINGS: &[char] = &['。', '！', '？', '!', '?', '\n'];

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Split text into chunks of at most `max_chars` characters.
///
/// Text at or under the limit comes back as a single chunk unchanged;
/// otherwise chunks are trimmed and paragraph joins inside a chunk keep
/// their blank line.
pub fn split_text_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    if char_len(text) <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in PARAGRAPH_SPLIT_RE.split(text) {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        let paragraph_len = char_len(paragraph);
        // +2 accounts for the blank line that would join the paragraphs
        if char_len(&current) + paragraph_len + 2 > max_chars {
            if !current.is_empty() {
                chunks.push(current.trim().to_string());
            }

            if paragraph_len > max_chars {
                let mut sentence_chunks = split_by_sentences(paragraph, max_chars);
                current = sentence_chunks.pop().unwrap_or_default();
                chunks.extend(sentence_chunks);
            } else {
                current = paragraph.to_string();
            }
        } else if current.is_empty() {
            current = paragraph.to_string();
        } else {
            current.push_str("\n\n");
            current.push_str(paragraph);
        }
    }

    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }

    chunks
}

/// Split an over-long paragraph at sentence endings
fn split_by_sentences(text: &str, max_chars: usize) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut buf = String::new();
    for ch in text.chars() {
        buf.push(ch);
        if SENTENCE_ENDINGS.contains(&ch) {
            sentences.push(std::mem::take(&mut buf));
        }
    }
    if !buf.is_empty() {
        sentences.push(buf);
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    for sentence in sentences {
        if char_len(&current) + char_len(&sentence) > max_chars {
            if !current.trim().is_empty() {
                chunks.push(current.trim().to_string());
            }
            current = sentence;
        } else {
            current.push_str(&sentence);
        }
    }
    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }

    if chunks.is_empty() {
        vec![text.to_string()]
    } else {
        chunks
    }
}
