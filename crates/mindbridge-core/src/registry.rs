//! Provider registry.
//!
//! Holds one adapter per configured provider, keyed by lower-cased provider
//! name. Built once at startup and never mutated afterwards, so it can be
//! shared behind an `Arc` and read concurrently without locking.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::ports::ProviderAdapter;

/// Immutable, name-keyed set of provider adapters.
///
/// Iteration order (listing, model maps) is alphabetical by provider name.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an adapter, keyed by its lower-cased provider name.
    ///
    /// A later adapter with the same name replaces the earlier one.
    #[must_use]
    pub fn with_provider(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
        let key = adapter.provider_name().to_lowercase();
        debug!(provider = %key, models = adapter.available_models().len(), "Registering provider");
        if self.providers.insert(key.clone(), adapter).is_some() {
            warn!(provider = %key, "Provider registered twice; keeping the latest adapter");
        }
        self
    }

    /// Find the adapter for `name`, case-insensitively.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn ProviderAdapter>> {
        self.providers.get(&name.to_lowercase()).cloned()
    }

    /// Names of all configured providers.
    #[must_use]
    pub fn list_configured(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Map of provider name to its models in adapter declaration order.
    #[must_use]
    pub fn list_all_models(&self) -> BTreeMap<String, Vec<String>> {
        self.providers
            .iter()
            .map(|(name, adapter)| {
                let models = adapter
                    .available_models()
                    .iter()
                    .map(|m| (*m).to_string())
                    .collect();
                (name.clone(), models)
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompletionChoice, FinishReason, GenerationRequest};
    use async_trait::async_trait;

    #[derive(Debug)]
    struct StaticAdapter {
        name: &'static str,
        models: &'static [&'static str],
    }

    #[async_trait]
    impl ProviderAdapter for StaticAdapter {
        fn provider_name(&self) -> &str {
            self.name
        }

        fn display_name(&self) -> &str {
            self.name
        }

        fn available_models(&self) -> &[&str] {
            self.models
        }

        async fn complete(&self, _request: &GenerationRequest) -> CompletionChoice {
            CompletionChoice::assistant(Some("ok".into()), None, FinishReason::Stop)
        }
    }

    fn registry() -> ProviderRegistry {
        ProviderRegistry::new()
            .with_provider(Arc::new(StaticAdapter {
                name: "openai",
                models: &["gpt-4o", "gpt-4o-mini"],
            }))
            .with_provider(Arc::new(StaticAdapter {
                name: "Anthropic",
                models: &["claude-3-haiku-20240307"],
            }))
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = registry();
        assert!(registry.lookup("OPENAI").is_some());
        assert!(registry.lookup("anthropic").is_some());
        assert!(registry.lookup("AnThRoPiC").is_some());
        assert!(registry.lookup("google").is_none());
    }

    #[test]
    fn test_list_configured_uses_lowercase_keys() {
        assert_eq!(registry().list_configured(), vec!["anthropic", "openai"]);
    }

    #[test]
    fn test_list_all_models_keeps_declaration_order() {
        let models = registry().list_all_models();
        assert_eq!(models["openai"], vec!["gpt-4o", "gpt-4o-mini"]);
        assert_eq!(models["anthropic"], vec!["claude-3-haiku-20240307"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = ProviderRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.list_configured().is_empty());
        assert!(registry.list_all_models().is_empty());
    }

    #[test]
    fn test_is_valid_model_is_case_sensitive() {
        let adapter = registry().lookup("openai").unwrap();
        assert!(adapter.is_valid_model("gpt-4o"));
        assert!(!adapter.is_valid_model("GPT-4O"));
        assert!(!adapter.is_valid_model("gpt-5"));
    }
}
