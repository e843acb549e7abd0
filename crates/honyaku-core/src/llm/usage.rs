//! Token usage bookkeeping

use serde::{Deserialize, Serialize};

/// Token counts reported by a provider for one call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt
    pub input_tokens: u64,
    /// Tokens generated in the response
    pub output_tokens: u64,
    /// Provider-reported total (input + output, plus any overhead the
    /// provider counts)
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Create a usage record; total falls back to the component sum when
    /// the provider did not report one.
    pub fn new(input_tokens: u64, output_tokens: u64, total_tokens: Option<u64>) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: total_tokens.unwrap_or(input_tokens + output_tokens),
        }
    }
}

/// Lifetime token totals for one engine instance.
///
/// Accumulates for the life of the process; never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageTotals {
    /// Sum of input tokens across all successful calls
    pub input_tokens: u64,
    /// Sum of output tokens across all successful calls
    pub output_tokens: u64,
}

impl UsageTotals {
    /// Add one call's usage to the running totals
    pub fn record(&mut self, usage: &TokenUsage) {
        self.input_tokens += usage.input_tokens;
        self.output_tokens += usage.output_tokens;
    }

    /// Combined input + output total
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_defaults_to_component_sum() {
        let usage = TokenUsage::new(120, 80, None);
        assert_eq!(usage.total_tokens, 200);

        let reported = TokenUsage::new(120, 80, Some(210));
        assert_eq!(reported.total_tokens, 210);
    }

    #[test]
    fn totals_accumulate_across_calls() {
        let mut totals = UsageTotals::default();
        totals.record(&TokenUsage::new(100, 50, None));
        totals.record(&TokenUsage::new(10, 5, None));
        assert_eq!(totals.input_tokens, 110);
        assert_eq!(totals.output_tokens, 55);
        assert_eq!(totals.total(), 165);
    }
}
