//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no transport details and use only domain
//! types.

pub mod provider_adapter;

use thiserror::Error;

pub use provider_adapter::ProviderAdapter;

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes, CLI exit
/// codes). Messages are written for the API caller: they name the bad value
/// and, where one exists, the list of valid alternatives.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid input (malformed model identifier, out-of-range parameter).
    #[error("{0}")]
    Validation(String),

    /// The requested provider has no adapter in the registry.
    #[error("Provider '{provider}' is not configured. Available providers: {configured:?}")]
    ProviderNotConfigured {
        provider: String,
        configured: Vec<String>,
    },

    /// The provider exists but does not serve the requested model.
    #[error(
        "Model '{model}' is not available for provider '{provider}'. Available models: {available:?}"
    )]
    ModelNotAvailable {
        provider: String,
        model: String,
        available: Vec<String>,
    },

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether the caller can fix this by changing the request.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}
