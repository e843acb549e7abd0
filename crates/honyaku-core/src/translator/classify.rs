//! Failure classification for the fallback state machine
//!
//! Adapter failures fall into three kinds, checked in priority order:
//! content blocks first (they poison every model of the same provider),
//! then rate limits, then everything else.

use crate::error::TranslatorError;

/// How a failed call should move the fallback cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Content-policy refusal: skip all remaining models of this provider
    ContentBlock,
    /// Rate limit or quota error: try the immediate next entry
    RateLimit,
    /// Anything else, including an empty response: same as rate limit
    Other,
}

/// Substrings that mark a content-policy refusal in provider error text
const BLOCK_INDICATORS: &[&str] = &[
    "prohibited_content",
    "blocked",
    "safety",
    "content_filter",
    "content policy",
    "content management policy",
    "harm_category",
    "recitation",
];

/// Substrings that mark rate-limit or quota errors
const RATE_LIMIT_INDICATORS: &[&str] = &[
    "429",
    "resource_exhausted",
    "rate limit",
    "rate_limit",
    "quota",
    "too many requests",
    "insufficient",
    "exceeded",
];

/// Classify an adapter failure.
///
/// Typed variants win; otherwise the rendered error text is scanned,
/// block indicators before rate-limit indicators.
pub fn classify(error: &TranslatorError) -> FailureKind {
    match error {
        TranslatorError::ContentBlocked(_) => FailureKind::ContentBlock,
        TranslatorError::RateLimited(_) => FailureKind::RateLimit,
        _ => {
            let text = error.to_string().to_lowercase();
            if BLOCK_INDICATORS.iter().any(|m| text.contains(m)) {
                FailureKind::ContentBlock
            } else if RATE_LIMIT_INDICATORS.iter().any(|m| text.contains(m)) {
                FailureKind::RateLimit
            } else {
                FailureKind::Other
            }
        }
    }
}
