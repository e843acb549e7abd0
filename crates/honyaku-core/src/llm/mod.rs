//! Provider roster, adapters and the backend seam

pub mod adapters;
pub mod backend;
pub mod kind;
pub mod roster;
pub mod usage;

pub use backend::{Completion, CompletionBackend, HttpBackend};
pub use kind::ProviderKind;
pub use roster::{build_roster, ProviderEntry};
pub use usage::{TokenUsage, UsageTotals};
