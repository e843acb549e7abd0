//! Script-based language detection
//!
//! Detection counts script-specific characters: hiragana/katakana are
//! unique to Japanese, hangul to Korean. Kanji is shared between
//! Japanese and Chinese so it never counts toward detection, but it does
//! count for `contains_japanese` (filename translation wants to catch
//! kanji-only titles).

fn is_kana(ch: char) -> bool {
    matches!(ch, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}')
}

fn is_hangul(ch: char) -> bool {
    matches!(ch,
        '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}')
}

fn is_cjk_ideograph(ch: char) -> bool {
    matches!(ch, '\u{4E00}'..='\u{9FAF}')
}

/// Detect the dominant source language of a text sample.
///
/// Returns `"ja"`, `"ko"` or `"en"`, or `None` when no script gives a
/// usable signal.
pub fn detect_source_language(text: &str) -> Option<&'static str> {
    let mut japanese = 0usize;
    let mut korean = 0usize;
    let mut english = 0usize;

    for ch in text.chars() {
        if is_kana(ch) {
            japanese += 1;
        } else if is_hangul(ch) {
            korean += 1;
        } else if ch.is_ascii_alphabetic() {
            english += 1;
        }
    }

    if japanese > korean {
        Some("ja")
    } else if korean > japanese {
        Some("ko")
    } else if japanese > 0 {
        Some("ja")
    } else if english > 0 {
        Some("en")
    } else {
        None
    }
}

/// Whether the text contains any Japanese script (kana or kanji)
pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(|ch| is_kana(ch) || is_cjk_ideograph(ch))
}

/// Whether the text contains any hangul
pub fn contains_korean(text: &str) -> bool {
    text.chars().any(is_hangul)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_japanese_by_kana() {
        assert_eq!(detect_source_language("吾輩は猫である。"), Some("ja"));
    }

    #[test]
    fn detects_korean_by_hangul() {
        assert_eq!(detect_source_language("나는 고양이로소이다."), Some("ko"));
    }

    #[test]
    fn mixed_text_follows_the_dominant_script() {
        // A Korean text quoting a Japanese word still detects as Korean.
        assert_eq!(
            detect_source_language("이 소설의 제목은 「ねこ」다. 주인공은 고양이다."),
            Some("ko")
        );
    }

    #[test]
    fn ascii_only_is_english() {
        assert_eq!(detect_source_language("I Am a Cat"), Some("en"));
    }

    #[test]
    fn digits_and_punctuation_are_unknown() {
        assert_eq!(detect_source_language("1234 - 5678"), None);
    }

    #[test]
    fn kanji_only_counts_as_japanese_for_contains_check() {
        // No kana, so detection cannot call it Japanese...
        assert_eq!(detect_source_language("夏目漱石"), None);
        // ...but a kanji-only filename still needs translating.
        assert!(contains_japanese("夏目漱石"));
        assert!(!contains_korean("夏目漱石"));
    }
}
