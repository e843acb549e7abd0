//! Honyaku core library
//!
//! This crate provides the translation engine for honyaku: an ordered
//! roster of provider/model endpoints, automatic fallback across them on
//! rate limits and content blocks, provider adapters for the Gemini,
//! OpenAI and Anthropic APIs, prompt construction, user dictionaries and
//! the text utilities (chunking, ruby conversion, language detection)
//! the file-translation front end builds on.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod text;
pub mod translator;

// Re-export commonly used types
pub use config::Config;
pub use dictionary::{DictionaryEntry, UserDictionary};
pub use error::{ExhaustedReason, TranslatorError, TranslatorResult};
pub use llm::backend::{Completion, CompletionBackend, HttpBackend};
pub use llm::kind::ProviderKind;
pub use llm::roster::{build_roster, ProviderEntry};
pub use llm::usage::{TokenUsage, UsageTotals};
pub use translator::{SwitchCallback, Translator};
