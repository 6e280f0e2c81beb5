//! Provider adapter port.
//!
//! One implementation per upstream vendor. An adapter translates the
//! provider-agnostic [`GenerationRequest`] into the vendor's API shape and
//! normalizes the result back into a [`CompletionChoice`].

use async_trait::async_trait;
use std::fmt;

use crate::domain::{CompletionChoice, GenerationRequest};

/// Capability every upstream provider implements.
///
/// Adapters are stateless between calls and shared read-only across
/// concurrent requests, hence `Send + Sync`.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + fmt::Debug {
    /// Registry key, lower-case (e.g. `"openai"`).
    fn provider_name(&self) -> &str;

    /// Human-readable identity used to prefix error choices
    /// (e.g. `"OpenAI"`).
    fn display_name(&self) -> &str;

    /// Models this adapter serves, in declaration order. Fixed per adapter.
    fn available_models(&self) -> &[&str];

    /// Exact, case-sensitive membership in [`Self::available_models`].
    fn is_valid_model(&self, model: &str) -> bool {
        self.available_models().iter().any(|m| *m == model)
    }

    /// Produce a completion for `request`.
    ///
    /// There is no failure channel: every upstream failure (network, auth,
    /// quota, timeout, malformed response) comes back as a choice with
    /// `finish_reason = error` and a message prefixed with
    /// [`Self::display_name`].
    async fn complete(&self, request: &GenerationRequest) -> CompletionChoice;
}
