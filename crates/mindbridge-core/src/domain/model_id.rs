//! Namespaced model identifiers: `mindbridge:<provider>/<model>`.

use std::fmt;
use std::str::FromStr;

use crate::ports::CoreError;

/// Namespace that marks a model string as routed by this gateway.
pub const MODEL_NAMESPACE: &str = "mindbridge";

/// Literal prefix every routed model identifier starts with.
pub const MODEL_PREFIX: &str = "mindbridge:";

/// A parsed model identifier.
///
/// The provider is lower-cased at parse time; the model name is kept
/// verbatim (it may be case-sensitive and may itself contain slashes).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelRef {
    pub provider: String,
    pub model: String,
}

impl ModelRef {
    /// Parse `mindbridge:<provider>/<model>`, splitting on the first `/`.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let Some(rest) = input.strip_prefix(MODEL_PREFIX) else {
            return Err(CoreError::Validation(format!(
                "Model must start with '{MODEL_PREFIX}'. Got: {input}"
            )));
        };

        let Some((provider, model)) = rest.split_once('/') else {
            return Err(CoreError::Validation(format!(
                "Model must be in format '{MODEL_PREFIX}provider/model'. Got: {input}"
            )));
        };

        Ok(Self {
            provider: provider.to_lowercase(),
            model: model.to_string(),
        })
    }

    /// Render the external identifier for a provider/model pair.
    #[must_use]
    pub fn namespaced(provider: &str, model: &str) -> String {
        format!("{MODEL_PREFIX}{provider}/{model}")
    }
}

impl FromStr for ModelRef {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MODEL_PREFIX}{}/{}", self.provider, self.model)
    }
}
