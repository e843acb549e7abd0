//! Text utilities: language detection, ruby annotation handling,
//! chunking for long documents, and output path naming.

mod chunk;
mod detect;
mod paths;
mod ruby;

pub use chunk::split_text_into_chunks;
pub use detect::{contains_japanese, contains_korean, detect_source_language};
pub use paths::output_path_with_suffix;
pub use ruby::convert_ruby_to_parentheses;
