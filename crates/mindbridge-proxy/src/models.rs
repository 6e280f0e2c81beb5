//! OpenAI API data models for request/response handling.
//!
//! Message and parameter types come from `mindbridge-core`, which already
//! uses the OpenAI field names; this module adds the HTTP envelopes around
//! them.

use std::collections::BTreeMap;

use mindbridge_core::{ChatMessage, GenerationParams, ModelRef, ProviderRegistry};
use serde::{Deserialize, Serialize};

/// Service name reported by `/health`.
pub const SERVICE_ID: &str = "mindbridge-router";

/// Service name reported by `/`.
pub const SERVICE_NAME: &str = "MindBridge Router";

/// Version reported by `/` and `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Chat Completion Request
// =============================================================================

/// Request to /v1/chat/completions endpoint.
///
/// Unknown OpenAI fields (`n`, `stop`, `user`, ...) are accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionRequest {
    /// Namespaced model, `mindbridge:<provider>/<model>`.
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(flatten)]
    pub params: GenerationParams,
    /// Accepted for compatibility; responses are never streamed.
    #[serde(default)]
    pub stream: bool,
}

// =============================================================================
// Models Endpoint Types
// =============================================================================

/// Response from /v1/models endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ModelsResponse {
    pub object: String,
    pub data: Vec<ModelInfo>,
}

impl ModelsResponse {
    /// One entry per model of every configured provider.
    pub fn from_registry(registry: &ProviderRegistry, created: i64) -> Self {
        let data = registry
            .list_all_models()
            .into_iter()
            .flat_map(|(provider, models)| {
                models.into_iter().map(move |model| ModelInfo {
                    id: ModelRef::namespaced(&provider, &model),
                    object: "model".to_string(),
                    created,
                    owned_by: provider.clone(),
                })
            })
            .collect();

        Self {
            object: "list".to_string(),
            data,
        }
    }
}

/// Information about a single model (OpenAI format).
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub owned_by: String,
}

/// Response from /providers.
#[derive(Debug, Clone, Serialize)]
pub struct ProvidersResponse {
    pub providers: BTreeMap<String, Vec<String>>,
}

// =============================================================================
// Service Info Types
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub providers: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

// =============================================================================
// Error Response Types
// =============================================================================

/// Error response matching OpenAI format.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail within an error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, error_type: &str) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                r#type: error_type.to_string(),
                code: None,
            },
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: Option<&str>) -> Self {
        self.error.code = code.map(str::to_string);
        self
    }
}
