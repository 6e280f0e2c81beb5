//! Internal error types for upstream calls.
//!
//! These errors never leave an adapter: [`into_choice`] turns them into an
//! error choice at the `complete()` boundary.

use mindbridge_core::CompletionChoice;
use thiserror::Error;
use tracing::warn;

use crate::config::ProviderKind;

/// Result type alias for upstream operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors raised while talking to an upstream provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network, TLS or timeout failure from the HTTP client.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("API request failed with status {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Upstream error message, or the raw body when it has none
        body: String,
    },

    /// The upstream answered 2xx but the payload is unusable.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// JSON encoding or decoding error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ProviderError {
    pub(crate) fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

/// Collapse an upstream result into the single choice an adapter returns.
pub(crate) fn into_choice(
    kind: ProviderKind,
    model: &str,
    result: ProviderResult<CompletionChoice>,
) -> CompletionChoice {
    match result {
        Ok(choice) => choice,
        Err(err) => {
            warn!(provider = kind.name(), model, error = %err, "Upstream call failed");
            CompletionChoice::upstream_error(kind.label(), err)
        }
    }
}
