//! Registry composition from provider credentials.

use std::sync::Arc;

use mindbridge_core::{ProviderAdapter, ProviderRegistry};
use tracing::info;

use crate::anthropic::AnthropicAdapter;
use crate::config::{ProviderClientConfig, ProviderKind, ProvidersConfig};
use crate::error::ProviderResult;
use crate::google::GeminiAdapter;
use crate::openai::OpenAiAdapter;

/// Build the production adapter for one configured provider.
pub fn build_adapter(config: &ProviderClientConfig) -> ProviderResult<Arc<dyn ProviderAdapter>> {
    let adapter: Arc<dyn ProviderAdapter> = match config.kind() {
        ProviderKind::OpenAi => Arc::new(OpenAiAdapter::new(config.clone())?),
        ProviderKind::Anthropic => Arc::new(AnthropicAdapter::new(config.clone())?),
        ProviderKind::Google => Arc::new(GeminiAdapter::new(config.clone())?),
    };
    Ok(adapter)
}

/// Build a registry holding one adapter per configured provider.
///
/// Providers without credentials are simply absent; an empty config yields
/// an empty registry.
pub fn build_registry(config: &ProvidersConfig) -> ProviderResult<ProviderRegistry> {
    let mut registry = ProviderRegistry::new();

    for client in config.iter() {
        let adapter = build_adapter(client)?;
        info!(
            provider = client.kind().name(),
            base_url = client.base_url(),
            models = adapter.available_models().len(),
            "Provider configured"
        );
        registry = registry.with_provider(adapter);
    }

    Ok(registry)
}
