//! Upstream provider adapters for mindbridge.
//!
//! Each adapter implements [`mindbridge_core::ProviderAdapter`] for one
//! vendor API:
//!
//! | Provider key | Adapter | Upstream |
//! |---|---|---|
//! | `openai` | [`OpenAiAdapter`] | `POST /v1/chat/completions` |
//! | `anthropic` | [`AnthropicAdapter`] | `POST /v1/messages` |
//! | `google` | [`GeminiAdapter`] | `POST /v1beta/models/{model}:generateContent` |
//!
//! Adapters are generic over [`HttpBackend`]; production code uses
//! [`ReqwestBackend`] and tests use the canned `FakeBackend` from
//! [`testing`] (enable the `test-utils` feature to reach it from other
//! crates).
//!
//! [`build_registry`] turns a [`ProvidersConfig`] into a ready
//! [`mindbridge_core::ProviderRegistry`].

#![deny(unused_crate_dependencies)]

mod anthropic;
mod config;
mod error;
mod factory;
mod google;
mod http;
mod openai;

// ============================================================================
// Public API
// ============================================================================

pub use anthropic::{ANTHROPIC_MODELS, AnthropicAdapter, DEFAULT_MAX_TOKENS};
pub use config::{DEFAULT_TIMEOUT, ProviderClientConfig, ProviderKind, ProvidersConfig};
pub use error::{ProviderError, ProviderResult};
pub use factory::{build_adapter, build_registry};
pub use google::{GEMINI_MODELS, GeminiAdapter};
pub use http::{HttpBackend, ReqwestBackend};
pub use openai::{OPENAI_MODELS, OpenAiAdapter, is_reasoning_model};

#[cfg(any(test, feature = "test-utils"))]
pub use http::testing;
