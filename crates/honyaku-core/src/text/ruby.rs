//! HTML ruby annotation conversion

use once_cell::sync::Lazy;
use regex::Regex;

static RUBY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<ruby>([^<]+)<rt>([^<]+)</rt></ruby>").expect("valid ruby regex")
});

/// Rewrite `<ruby>漢字<rt>かんじ</rt></ruby>` to `漢字(かんじ)`, or to the
/// bare base text when `keep_reading` is false.
///
/// Ruby markup confuses models into translating base and reading as two
/// separate words; the parenthesized form keeps them together.
pub fn convert_ruby_to_parentheses(content: &str, keep_reading: bool) -> String {
    if keep_reading {
        RUBY_RE.replace_all(content, "$1($2)").into_owned()
    } else {
        RUBY_RE.replace_all(content, "$1").into_owned()
    }
}
