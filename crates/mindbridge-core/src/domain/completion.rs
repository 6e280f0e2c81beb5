//! Completion output types: the adapter's choice and the response envelope.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::chat::{ChatMessage, Role, ToolCall};

/// Why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    /// The upstream call failed; the message carries the description.
    Error,
}

impl FinishReason {
    /// Parse one of the gateway's own finish reasons.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "stop" => Some(Self::Stop),
            "length" => Some(Self::Length),
            "tool_calls" => Some(Self::ToolCalls),
            "content_filter" => Some(Self::ContentFilter),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Length => "length",
            Self::ToolCalls => "tool_calls",
            Self::ContentFilter => "content_filter",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for FinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One generated alternative. The gateway always produces exactly one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionChoice {
    /// Always 0.
    pub index: u32,
    /// Assistant message.
    pub message: ChatMessage,
    pub finish_reason: FinishReason,
}

impl CompletionChoice {
    /// Build the single assistant choice.
    pub fn assistant(
        content: Option<String>,
        tool_calls: Option<Vec<ToolCall>>,
        finish_reason: FinishReason,
    ) -> Self {
        Self {
            index: 0,
            message: ChatMessage {
                role: Role::Assistant,
                content,
                name: None,
                tool_calls: tool_calls.filter(|calls| !calls.is_empty()),
                tool_call_id: None,
            },
            finish_reason,
        }
    }

    /// Build the error choice an adapter returns instead of failing.
    pub fn upstream_error(provider_label: &str, detail: impl std::fmt::Display) -> Self {
        Self::assistant(
            Some(format!("Error calling {provider_label}: {detail}")),
            None,
            FinishReason::Error,
        )
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.finish_reason == FinishReason::Error
    }
}

/// Approximate token usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    /// Build usage where the total is always the sum of both parts.
    #[must_use]
    pub const fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

/// Response envelope for `/v1/chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub id: String,
    pub object: String,
    pub created: i64,
    /// The namespaced model string exactly as the caller sent it.
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    pub usage: Usage,
}

impl ChatCompletion {
    /// Assemble an envelope with a fresh ID and the current timestamp.
    pub fn new(model: impl Into<String>, choice: CompletionChoice, usage: Usage) -> Self {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(24);

        Self {
            id: format!("chatcmpl-{id}"),
            object: "chat.completion".to_string(),
            created: Utc::now().timestamp(),
            model: model.into(),
            choices: vec![choice],
            usage,
        }
    }
}
