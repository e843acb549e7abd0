//! Error types for the honyaku engine

use thiserror::Error;

/// Result type alias for engine operations
pub type TranslatorResult<T> = Result<T, TranslatorError>;

/// Why the fallback roster ran out of entries.
///
/// Each variant carries its own user-facing message so the caller can
/// tell a content-policy dead end apart from quota exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustedReason {
    /// Every remaining provider refused the content
    AllProvidersBlocked,
    /// Rate limits or quota errors on every entry
    QuotaExhausted,
    /// Generic failures on every entry
    AllModelsFailed,
}

impl std::fmt::Display for ExhaustedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllProvidersBlocked => {
                write!(f, "all providers blocked the content; nothing left to try")
            }
            Self::QuotaExhausted => {
                write!(f, "quota exhausted on every configured model; try again later")
            }
            Self::AllModelsFailed => write!(f, "every configured model failed"),
        }
    }
}

/// Main error type for the translation engine
#[derive(Error, Debug, Clone)]
pub enum TranslatorError {
    /// Configuration errors (missing/invalid credentials, unresolvable
    /// provider name, no usable client). Fatal, never retried.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The provider refused the request on content-policy grounds
    #[error("Content blocked: {0}")]
    ContentBlocked(String),

    /// Rate limit or quota error from the provider
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Any other API failure, including an empty response body
    #[error("API error: {0}")]
    Api(String),

    /// The whole roster was walked without a successful call
    #[error("Translation failed: {0}")]
    Exhausted(ExhaustedReason),

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl TranslatorError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new content-block error
    pub fn content_blocked(message: impl Into<String>) -> Self {
        Self::ContentBlocked(message.into())
    }

    /// Create a new rate-limit error
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited(message.into())
    }

    /// Create a new API error
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Whether this error is fatal for the whole call chain rather than
    /// grounds for advancing to the next roster entry.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Exhausted(_))
    }
}

impl From<std::io::Error> for TranslatorError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for TranslatorError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}

impl From<reqwest::Error> for TranslatorError {
    fn from(error: reqwest::Error) -> Self {
        Self::Api(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_reasons_have_distinct_messages() {
        let blocked = ExhaustedReason::AllProvidersBlocked.to_string();
        let quota = ExhaustedReason::QuotaExhausted.to_string();
        let generic = ExhaustedReason::AllModelsFailed.to_string();
        assert_ne!(blocked, quota);
        assert_ne!(quota, generic);
        assert!(blocked.contains("blocked"));
        assert!(quota.contains("quota"));
    }

    #[test]
    fn config_errors_are_fatal() {
        assert!(TranslatorError::config("no key").is_fatal());
        assert!(TranslatorError::Exhausted(ExhaustedReason::AllModelsFailed).is_fatal());
        assert!(!TranslatorError::rate_limited("429").is_fatal());
        assert!(!TranslatorError::api("boom").is_fatal());
    }
}
