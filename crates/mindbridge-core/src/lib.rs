//! Core domain for the mindbridge model-routing gateway.
//!
//! This crate owns everything that does not depend on a transport:
//!
//! - [`domain`]: provider-agnostic chat types, generation parameters,
//!   completion choices and the `mindbridge:<provider>/<model>` identifier.
//! - [`ports`]: the [`ProviderAdapter`] capability every upstream provider
//!   implements, plus the canonical [`CoreError`].
//! - [`registry`]: the immutable, name-keyed [`ProviderRegistry`].
//! - [`services`]: the [`ChatDispatcher`] that ties parsing, lookup,
//!   validation, completion and usage estimation together.
//!
//! Concrete adapters live in `mindbridge-providers`; the HTTP surface lives
//! in `mindbridge-proxy`.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod registry;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    ChatCompletion, ChatMessage, CompletionChoice, FinishReason, FunctionCall,
    FunctionDefinition, GenerationParams, GenerationRequest, MODEL_NAMESPACE, MODEL_PREFIX,
    ModelRef, ReasoningEffort, Role, ToolCall, ToolDefinition, ToolKind, Usage,
};
pub use ports::{CoreError, ProviderAdapter};
pub use registry::ProviderRegistry;
pub use services::{ChatDispatcher, estimate_tokens, estimate_usage};
