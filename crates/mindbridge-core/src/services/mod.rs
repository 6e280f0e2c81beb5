//! Core services.
//!
//! Services orchestrate ports and domain logic; they hold no transport
//! details.

mod dispatch;
mod usage;

pub use dispatch::ChatDispatcher;
pub use usage::{TOKENS_PER_WORD, estimate_tokens, estimate_usage};
