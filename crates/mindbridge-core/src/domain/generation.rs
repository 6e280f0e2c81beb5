//! Generation request types handed to provider adapters.

use serde::{Deserialize, Serialize};

use super::chat::{ChatMessage, ToolDefinition};
use crate::ports::CoreError;

/// Reasoning effort hint for reasoning model families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    Medium,
    High,
}

impl ReasoningEffort {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Optional sampling parameters.
///
/// Every field is optional; `None` means "use the provider default",
/// never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Sampling temperature (0-2).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Nucleus sampling (0-1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Frequency penalty (-2..2).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    /// Presence penalty (-2..2).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    /// Maximum tokens to generate (>= 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Tool definitions for function calling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    /// Tool choice: "auto", "none", "required", or a specific tool object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
}

impl GenerationParams {
    /// Check every supplied parameter against its allowed range.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_range("temperature", self.temperature, 0.0, 2.0)?;
        check_range("top_p", self.top_p, 0.0, 1.0)?;
        check_range("frequency_penalty", self.frequency_penalty, -2.0, 2.0)?;
        check_range("presence_penalty", self.presence_penalty, -2.0, 2.0)?;

        if self.max_tokens == Some(0) {
            return Err(CoreError::Validation(
                "max_tokens must be at least 1, got 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_range(field: &str, value: Option<f32>, min: f32, max: f32) -> Result<(), CoreError> {
    match value {
        Some(v) if !(min..=max).contains(&v) => Err(CoreError::Validation(format!(
            "{field} must be between {min} and {max}, got {v}"
        ))),
        _ => Ok(()),
    }
}

/// Input to a provider adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Conversation so far, in order.
    pub messages: Vec<ChatMessage>,
    /// Provider-local model name (no namespace).
    pub model: String,
    pub params: GenerationParams,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: model.into(),
            params: GenerationParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Validate parameters and the per-message content invariant.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.params.validate()?;

        if let Some((index, msg)) = self
            .messages
            .iter()
            .enumerate()
            .find(|(_, msg)| msg.content.is_none() && !msg.content_is_optional())
        {
            return Err(CoreError::Validation(format!(
                "messages[{index}] ({}) has no content; content may only be omitted \
                 for assistant tool calls or tool results",
                msg.role
            )));
        }

        Ok(())
    }
}
