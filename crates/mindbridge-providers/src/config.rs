//! Provider identities and client configuration.
//!
//! [`ProvidersConfig`] is the credential set the registry is built from; an
//! empty or missing API key leaves that provider unconfigured.

use std::fmt;
use std::time::Duration;

/// Default upstream call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// The upstream vendors this crate has adapters for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Google,
}

impl ProviderKind {
    pub const ALL: [Self; 3] = [Self::OpenAi, Self::Anthropic, Self::Google];

    /// Registry key used in `mindbridge:<provider>/<model>`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
        }
    }

    /// Identity used to prefix error choices.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Google => "Google Gemini",
        }
    }

    #[must_use]
    pub const fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com",
            Self::Anthropic => "https://api.anthropic.com",
            Self::Google => "https://generativelanguage.googleapis.com",
        }
    }

    /// Environment variable holding the credential.
    #[must_use]
    pub const fn api_key_env(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Google => "GOOGLE_API_KEY",
        }
    }

    /// Environment variable overriding the base URL.
    #[must_use]
    pub const fn base_url_env(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_BASE_URL",
            Self::Anthropic => "ANTHROPIC_BASE_URL",
            Self::Google => "GOOGLE_BASE_URL",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for one upstream client.
///
/// ```
/// use mindbridge_providers::{ProviderClientConfig, ProviderKind};
/// use std::time::Duration;
///
/// let config = ProviderClientConfig::new(ProviderKind::OpenAi, "sk-test")
///     .with_base_url("http://localhost:9000/")
///     .with_timeout(Duration::from_secs(30));
/// assert_eq!(config.base_url(), "http://localhost:9000");
/// ```
#[derive(Clone)]
pub struct ProviderClientConfig {
    pub(crate) kind: ProviderKind,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
    pub(crate) user_agent: String,
}

impl ProviderClientConfig {
    /// Create a configuration with the provider's default base URL.
    pub fn new(kind: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            kind,
            api_key: api_key.into(),
            base_url: kind.default_base_url().to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("mindbridge/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Override the base URL. A trailing `/` is dropped.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 120 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn kind(&self) -> ProviderKind {
        self.kind
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

// Keep credentials out of logs.
impl fmt::Debug for ProviderClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderClientConfig")
            .field("kind", &self.kind)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Credentials for every provider that should be served.
#[derive(Debug, Clone, Default)]
pub struct ProvidersConfig {
    providers: Vec<ProviderClientConfig>,
}

impl ProvidersConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read credentials and base URL overrides from the process environment.
    #[must_use]
    pub fn from_env(timeout: Duration) -> Self {
        Self::from_env_lookup(|key| std::env::var(key).ok(), timeout)
    }

    /// Build from an arbitrary key lookup.
    ///
    /// Blank API keys and blank base URLs count as absent.
    #[must_use]
    pub fn from_env_lookup<F>(lookup: F, timeout: Duration) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        ProviderKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let api_key = present(kind.api_key_env())?;
                let mut config =
                    ProviderClientConfig::new(kind, api_key.trim()).with_timeout(timeout);
                if let Some(url) = present(kind.base_url_env()) {
                    config = config.with_base_url(url.trim());
                }
                Some(config)
            })
            .fold(Self::new(), Self::with_provider)
    }

    /// Add or replace the configuration for `config.kind()`.
    ///
    /// A blank API key is ignored.
    #[must_use]
    pub fn with_provider(mut self, config: ProviderClientConfig) -> Self {
        if config.api_key.trim().is_empty() {
            return self;
        }
        self.providers.retain(|existing| existing.kind != config.kind);
        self.providers.push(config);
        self
    }

    #[must_use]
    pub fn get(&self, kind: ProviderKind) -> Option<&ProviderClientConfig> {
        self.providers.iter().find(|config| config.kind == kind)
    }

    /// Configured providers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderClientConfig> {
        self.providers.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
