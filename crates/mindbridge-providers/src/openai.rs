//! OpenAI chat-completions adapter.
//!
//! Messages are forwarded in their native shape. Reasoning models (the
//! `o1` family) reject `temperature` and are the only ones that receive
//! `reasoning_effort`.

use async_trait::async_trait;
use mindbridge_core::{
    ChatMessage, CompletionChoice, FinishReason, GenerationRequest, ProviderAdapter,
    ReasoningEffort, ToolCall, ToolDefinition,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{ProviderClientConfig, ProviderKind};
use crate::error::{ProviderError, ProviderResult, into_choice};
use crate::http::{HttpBackend, ReqwestBackend};

/// Models served through this adapter.
pub const OPENAI_MODELS: &[&str] = &[
    "gpt-4o",
    "gpt-4o-mini",
    "gpt-4-turbo",
    "gpt-4",
    "gpt-3.5-turbo",
    "o1",
    "o1-mini",
    "o1-preview",
];

const REASONING_PREFIX: &str = "o1";

/// Whether `model` belongs to the reasoning family.
pub fn is_reasoning_model(model: &str) -> bool {
    model.starts_with(REASONING_PREFIX)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolDefinition]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<ReasoningEffort>,
}

impl<'a> ChatRequest<'a> {
    fn from_request(request: &'a GenerationRequest) -> Self {
        let params = &request.params;
        let reasoning = is_reasoning_model(&request.model);

        Self {
            model: &request.model,
            messages: &request.messages,
            temperature: params.temperature.filter(|_| !reasoning),
            top_p: params.top_p,
            frequency_penalty: params.frequency_penalty,
            presence_penalty: params.presence_penalty,
            max_tokens: params.max_tokens,
            tools: params.tools.as_deref(),
            tool_choice: params.tool_choice.as_ref(),
            reasoning_effort: params.reasoning_effort.filter(|_| reasoning),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ResponseChoice>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

/// Map an upstream finish reason into the gateway's set.
fn map_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("function_call") => FinishReason::ToolCalls,
        Some(other) => FinishReason::parse(other)
            .filter(|reason| *reason != FinishReason::Error)
            .unwrap_or(FinishReason::Stop),
        None => FinishReason::Stop,
    }
}

/// Adapter for the OpenAI chat-completions API.
#[derive(Debug)]
pub struct OpenAiAdapter<B: HttpBackend = ReqwestBackend> {
    config: ProviderClientConfig,
    backend: B,
}

impl OpenAiAdapter {
    pub fn new(config: ProviderClientConfig) -> ProviderResult<Self> {
        let backend = ReqwestBackend::new(&config)?;
        Ok(Self::with_backend(config, backend))
    }
}

impl<B: HttpBackend> OpenAiAdapter<B> {
    /// Create an adapter over a custom backend.
    pub const fn with_backend(config: ProviderClientConfig, backend: B) -> Self {
        Self { config, backend }
    }

    async fn send(&self, request: &GenerationRequest) -> ProviderResult<CompletionChoice> {
        let url = format!("{}/v1/chat/completions", self.config.base_url);
        let body = serde_json::to_value(ChatRequest::from_request(request))?;
        let headers = [(
            "authorization",
            format!("Bearer {}", self.config.api_key),
        )];

        let reply = self.backend.post_json(&url, &headers, &body).await?;
        let response: ChatResponse = serde_json::from_value(reply)?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::invalid_response("response contained no choices"))?;

        let ResponseMessage {
            content,
            tool_calls,
        } = choice.message;
        let has_tool_calls = tool_calls.as_ref().is_some_and(|calls| !calls.is_empty());
        let content = if has_tool_calls {
            content
        } else {
            Some(content.unwrap_or_default())
        };

        Ok(CompletionChoice::assistant(
            content,
            tool_calls,
            map_finish_reason(choice.finish_reason.as_deref()),
        ))
    }
}

#[async_trait]
impl<B: HttpBackend> ProviderAdapter for OpenAiAdapter<B> {
    fn provider_name(&self) -> &str {
        ProviderKind::OpenAi.name()
    }

    fn display_name(&self) -> &str {
        ProviderKind::OpenAi.label()
    }

    fn available_models(&self) -> &[&str] {
        OPENAI_MODELS
    }

    async fn complete(&self, request: &GenerationRequest) -> CompletionChoice {
        into_choice(ProviderKind::OpenAi, &request.model, self.send(request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use mindbridge_core::GenerationParams;
    use serde_json::json;

    fn adapter(backend: FakeBackend) -> OpenAiAdapter<FakeBackend> {
        OpenAiAdapter::with_backend(
            ProviderClientConfig::new(ProviderKind::OpenAi, "sk-test")
                .with_base_url("http://upstream.test"),
            backend,
        )
    }

    fn ok_reply(content: &str) -> Value {
        json!({
            "id": "chatcmpl-upstream",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    fn params() -> GenerationParams {
        GenerationParams {
            temperature: Some(0.2),
            max_tokens: Some(64),
            reasoning_effort: Some(ReasoningEffort::High),
            ..GenerationParams::default()
        }
    }

    #[tokio::test]
    async fn test_request_shape_for_chat_model() {
        let backend = FakeBackend::with_json(ok_reply("Hello!"));
        let adapter = adapter(backend.clone());

        let request = GenerationRequest::new(
            "gpt-4o",
            vec![ChatMessage::system("Be brief."), ChatMessage::user("Hi")],
        )
        .with_params(params());
        let choice = adapter.complete(&request).await;

        assert_eq!(choice.message.text(), "Hello!");
        assert_eq!(choice.finish_reason, FinishReason::Stop);

        let sent = backend.last_request().unwrap();
        assert_eq!(sent.url, "http://upstream.test/v1/chat/completions");
        assert_eq!(sent.header("authorization"), Some("Bearer sk-test"));
        assert_eq!(sent.body["model"], "gpt-4o");
        assert_eq!(sent.body["messages"][0]["role"], "system");
        assert_eq!(sent.body["max_tokens"], 64);
        assert!(sent.body.get("temperature").is_some());
        assert!(sent.body.get("reasoning_effort").is_none());
    }

    #[tokio::test]
    async fn test_reasoning_model_drops_temperature() {
        let backend = FakeBackend::with_json(ok_reply("Thought about it."));
        let adapter = adapter(backend.clone());

        let request = GenerationRequest::new("o1-mini", vec![ChatMessage::user("Why?")])
            .with_params(params());
        adapter.complete(&request).await;

        let body = backend.last_request().unwrap().body;
        assert!(body.get("temperature").is_none());
        assert_eq!(body["reasoning_effort"], "high");
        assert_eq!(body["max_tokens"], 64);
    }

    #[tokio::test]
    async fn test_unset_params_are_not_sent() {
        let backend = FakeBackend::with_json(ok_reply("ok"));
        let adapter = adapter(backend.clone());

        adapter
            .complete(&GenerationRequest::new("gpt-4", vec![ChatMessage::user("x")]))
            .await;

        let body = backend.last_request().unwrap().body;
        for key in ["temperature", "top_p", "max_tokens", "tools", "tool_choice"] {
            assert!(body.get(key).is_none(), "{key} should be omitted");
        }
    }

    #[tokio::test]
    async fn test_tool_call_reply_is_normalized() {
        let backend = FakeBackend::with_json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "lookup", "arguments": "{\"q\":\"rust\"}"}
                    }]
                },
                "finish_reason": "function_call"
            }]
        }));
        let choice = adapter(backend)
            .complete(&GenerationRequest::new("gpt-4o", vec![ChatMessage::user("x")]))
            .await;

        assert_eq!(choice.finish_reason, FinishReason::ToolCalls);
        assert!(choice.message.content.is_none());
        let calls = choice.message.tool_calls.unwrap();
        assert_eq!(calls[0].function.name, "lookup");
        assert_eq!(calls[0].function.arguments, "{\"q\":\"rust\"}");
    }

    #[test]
    fn test_unknown_finish_reason_maps_to_stop() {
        assert_eq!(map_finish_reason(Some("weird")), FinishReason::Stop);
        assert_eq!(map_finish_reason(None), FinishReason::Stop);
        assert_eq!(map_finish_reason(Some("length")), FinishReason::Length);
        assert_eq!(map_finish_reason(Some("error")), FinishReason::Stop);
        assert_eq!(
            map_finish_reason(Some("content_filter")),
            FinishReason::ContentFilter
        );
    }

    #[tokio::test]
    async fn test_upstream_failure_becomes_error_choice() {
        let adapter = adapter(FakeBackend::with_status(401, "Incorrect API key provided"));

        let choice = adapter
            .complete(&GenerationRequest::new("gpt-4o", vec![ChatMessage::user("x")]))
            .await;

        assert_eq!(choice.finish_reason, FinishReason::Error);
        assert!(choice.message.text().starts_with("Error calling OpenAI: "));
        assert!(choice.message.text().contains("Incorrect API key provided"));
    }

    #[tokio::test]
    async fn test_empty_choices_is_error_choice() {
        let adapter = adapter(FakeBackend::with_json(json!({"choices": []})));
        let choice = adapter
            .complete(&GenerationRequest::new("gpt-4o", vec![ChatMessage::user("x")]))
            .await;
        assert!(choice.is_error());
    }

    #[test]
    fn test_reasoning_prefix() {
        assert!(is_reasoning_model("o1"));
        assert!(is_reasoning_model("o1-preview"));
        assert!(!is_reasoning_model("gpt-4o"));
    }
}
