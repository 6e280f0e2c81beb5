//! Chat completion dispatch.
//!
//! The dispatcher is the single entry point for a completion: it validates
//! the request, resolves the namespaced model to an adapter, runs the
//! completion and assembles the response envelope.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{ChatCompletion, ChatMessage, GenerationParams, GenerationRequest, ModelRef};
use crate::ports::{CoreError, ProviderAdapter};
use crate::registry::ProviderRegistry;

use super::usage::estimate_usage;

/// Routes chat completions to the adapter named in the model identifier.
#[derive(Debug, Clone)]
pub struct ChatDispatcher {
    registry: Arc<ProviderRegistry>,
}

impl ChatDispatcher {
    #[must_use]
    pub const fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Resolve a namespaced model identifier to its adapter.
    ///
    /// Fails when the identifier is malformed, the provider has no adapter,
    /// or the adapter does not list the model.
    pub fn resolve(&self, model_id: &str) -> Result<(Arc<dyn ProviderAdapter>, ModelRef), CoreError> {
        let model_ref = ModelRef::parse(model_id)?;

        let Some(adapter) = self.registry.lookup(&model_ref.provider) else {
            return Err(CoreError::ProviderNotConfigured {
                provider: model_ref.provider,
                configured: self.registry.list_configured(),
            });
        };

        if !adapter.is_valid_model(&model_ref.model) {
            return Err(CoreError::ModelNotAvailable {
                provider: model_ref.provider,
                model: model_ref.model,
                available: adapter
                    .available_models()
                    .iter()
                    .map(|m| (*m).to_string())
                    .collect(),
            });
        }

        Ok((adapter, model_ref))
    }

    /// Run one chat completion.
    ///
    /// Upstream failures do not surface here: the adapter returns an error
    /// choice and the envelope is still assembled around it. Only request
    /// problems the caller can fix (and internal faults) are returned as
    /// `Err`.
    pub async fn dispatch(
        &self,
        requested_model: &str,
        messages: Vec<ChatMessage>,
        params: GenerationParams,
    ) -> Result<ChatCompletion, CoreError> {
        params.validate()?;

        let (adapter, model_ref) = self.resolve(requested_model)?;

        let request = GenerationRequest::new(model_ref.model.clone(), messages).with_params(params);
        request.validate()?;

        debug!(
            provider = %model_ref.provider,
            model = %model_ref.model,
            messages = request.messages.len(),
            "Dispatching chat completion"
        );

        let choice = adapter.complete(&request).await;

        if choice.is_error() {
            warn!(
                provider = %model_ref.provider,
                model = %model_ref.model,
                "Upstream call failed; returning error choice"
            );
        }

        let usage = estimate_usage(&request.messages, &choice);

        info!(
            provider = %model_ref.provider,
            model = %model_ref.model,
            finish_reason = %choice.finish_reason,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "Chat completion finished"
        );

        Ok(ChatCompletion::new(requested_model, choice, usage))
    }
}
