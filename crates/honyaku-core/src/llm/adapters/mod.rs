//! Provider-native call adapters
//!
//! Each adapter builds a provider-native request from the prompt text,
//! issues the call, extracts the response text and pulls token counts
//! out of the response when the provider reports them. HTTP error bodies
//! are folded (sanitized) into the error message so the fallback
//! classifier can see the provider's status strings.

pub mod anthropic;
mod error_text;
pub mod gemini;
pub mod openai;

pub(crate) use error_text::{api_error, sanitize_error_text};
