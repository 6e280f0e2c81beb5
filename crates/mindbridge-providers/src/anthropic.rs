//! Anthropic Messages API adapter.
//!
//! System messages are lifted out of the conversation into the top-level
//! `system` field. `max_tokens` is mandatory upstream, so a default is
//! supplied when the caller leaves it unset.

use async_trait::async_trait;
use mindbridge_core::{
    ChatMessage, CompletionChoice, FinishReason, GenerationRequest, ProviderAdapter, Role,
};
use serde::{Deserialize, Serialize};

use crate::config::{ProviderClientConfig, ProviderKind};
use crate::error::{ProviderResult, into_choice};
use crate::http::{HttpBackend, ReqwestBackend};

/// Models served through this adapter.
pub const ANTHROPIC_MODELS: &[&str] = &[
    "claude-opus-4-6",
    "claude-sonnet-4-6",
    "claude-sonnet-4-5",
    "claude-opus-4-5",
    "claude-3-5-sonnet-20241022",
    "claude-3-5-sonnet-20240620",
    "claude-3-5-haiku-20241022",
    "claude-3-opus-20240229",
    "claude-3-sonnet-20240229",
    "claude-3-haiku-20240307",
];

/// `max_tokens` sent when the request does not set one.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Join every system message, in order, with a blank line.
///
/// `None` when the joined text is empty.
fn merge_system(messages: &[ChatMessage]) -> Option<String> {
    let merged = messages
        .iter()
        .filter(|msg| msg.role == Role::System)
        .map(ChatMessage::text)
        .collect::<Vec<_>>()
        .join("\n\n");

    (!merged.is_empty()).then_some(merged)
}

impl<'a> MessagesRequest<'a> {
    fn from_request(request: &'a GenerationRequest) -> Self {
        let messages = request
            .messages
            .iter()
            .filter(|msg| msg.role != Role::System)
            .map(|msg| WireMessage {
                role: msg.role.as_str(),
                content: msg.text(),
            })
            .collect();

        Self {
            model: &request.model,
            messages,
            max_tokens: request.params.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            system: merge_system(&request.messages),
            temperature: request.params.temperature,
            top_p: request.params.top_p,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

/// Only text blocks carry `text`; other block types are skipped.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Map Anthropic's stop reasons into the gateway's set.
fn map_stop_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("max_tokens" | "length") => FinishReason::Length,
        Some("tool_use" | "tool_calls") => FinishReason::ToolCalls,
        Some("refusal" | "content_filter") => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    }
}

/// Adapter for the Anthropic Messages API.
#[derive(Debug)]
pub struct AnthropicAdapter<B: HttpBackend = ReqwestBackend> {
    config: ProviderClientConfig,
    backend: B,
}

impl AnthropicAdapter {
    pub fn new(config: ProviderClientConfig) -> ProviderResult<Self> {
        let backend = ReqwestBackend::new(&config)?;
        Ok(Self::with_backend(config, backend))
    }
}

impl<B: HttpBackend> AnthropicAdapter<B> {
    /// Create an adapter over a custom backend.
    pub const fn with_backend(config: ProviderClientConfig, backend: B) -> Self {
        Self { config, backend }
    }

    async fn send(&self, request: &GenerationRequest) -> ProviderResult<CompletionChoice> {
        let url = format!("{}/v1/messages", self.config.base_url);
        let body = serde_json::to_value(MessagesRequest::from_request(request))?;
        let headers = [
            ("x-api-key", self.config.api_key.clone()),
            ("anthropic-version", API_VERSION.to_string()),
        ];

        let reply = self.backend.post_json(&url, &headers, &body).await?;
        let response: MessagesResponse = serde_json::from_value(reply)?;

        let content: String = response
            .content
            .into_iter()
            .filter_map(|block| block.text)
            .collect();

        Ok(CompletionChoice::assistant(
            Some(content),
            None,
            map_stop_reason(response.stop_reason.as_deref()),
        ))
    }
}

#[async_trait]
impl<B: HttpBackend> ProviderAdapter for AnthropicAdapter<B> {
    fn provider_name(&self) -> &str {
        ProviderKind::Anthropic.name()
    }

    fn display_name(&self) -> &str {
        ProviderKind::Anthropic.label()
    }

    fn available_models(&self) -> &[&str] {
        ANTHROPIC_MODELS
    }

    async fn complete(&self, request: &GenerationRequest) -> CompletionChoice {
        into_choice(ProviderKind::Anthropic, &request.model, self.send(request).await)
    }
}
