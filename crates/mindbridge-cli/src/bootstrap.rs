//! Composition root.
//!
//! This is the ONLY place where provider adapters, the registry and the
//! dispatcher are wired together.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use mindbridge_core::{ChatDispatcher, ProviderRegistry};
use mindbridge_providers::{ProvidersConfig, build_registry};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Everything needed to build the runtime context.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub providers: ProvidersConfig,
}

impl CliConfig {
    /// Read provider credentials from the environment.
    pub fn from_env(upstream_timeout: Duration) -> Self {
        Self {
            providers: ProvidersConfig::from_env(upstream_timeout),
        }
    }
}

/// Initialized services shared by command handlers.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub dispatcher: ChatDispatcher,
}

impl CliContext {
    pub fn registry(&self) -> &ProviderRegistry {
        self.dispatcher.registry()
    }
}

/// Build the registry and dispatcher.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext> {
    let registry = build_registry(&config.providers)?;

    if registry.is_empty() {
        warn!("No provider API keys found; every chat completion will be rejected");
    } else {
        info!(providers = ?registry.list_configured(), "Providers ready");
    }

    Ok(CliContext {
        dispatcher: ChatDispatcher::new(Arc::new(registry)),
    })
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
