//! Usage estimation.
//!
//! This is a word-count heuristic, not a tokenizer: each side is estimated
//! as `round(words * 1.3)` and the total is their sum.

use crate::domain::{ChatMessage, CompletionChoice, Usage};

/// Approximate tokens per whitespace-separated word.
pub const TOKENS_PER_WORD: f64 = 1.3;

/// Estimate the token count of `text`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn estimate_tokens(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    (words as f64 * TOKENS_PER_WORD).round() as u32
}

/// Estimate usage for a prompt and the choice generated from it.
///
/// The prompt is every message's content joined with spaces; messages
/// without content contribute nothing.
#[must_use]
pub fn estimate_usage(messages: &[ChatMessage], choice: &CompletionChoice) -> Usage {
    let prompt = messages
        .iter()
        .map(ChatMessage::text)
        .collect::<Vec<_>>()
        .join(" ");

    Usage::new(estimate_tokens(&prompt), estimate_tokens(choice.message.text()))
}
