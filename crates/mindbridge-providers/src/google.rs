//! Google Gemini `generateContent` adapter.
//!
//! Gemini has no system role inside `contents` and calls the assistant
//! `model`. The conversation is split into prior history plus the active
//! turn, which is always sent as the user's.

use async_trait::async_trait;
use mindbridge_core::{
    ChatMessage, CompletionChoice, FinishReason, GenerationParams, GenerationRequest,
    ProviderAdapter, Role,
};
use serde::{Deserialize, Serialize};

use crate::config::{ProviderClientConfig, ProviderKind};
use crate::error::{ProviderError, ProviderResult, into_choice};
use crate::http::{HttpBackend, ReqwestBackend};

/// Models served through this adapter.
pub const GEMINI_MODELS: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-2.0-flash-exp",
    "gemini-1.5-pro",
    "gemini-1.5-pro-002",
    "gemini-1.5-flash",
    "gemini-1.5-flash-002",
    "gemini-1.0-pro",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> Content<'a> {
    fn text(role: Option<&'static str>, text: &'a str) -> Self {
        Self {
            role,
            parts: vec![Part { text }],
        }
    }
}

/// The conversation rearranged into Gemini's shape.
#[derive(Debug, PartialEq, Eq)]
struct TurnPlan<'a> {
    system_instruction: Option<&'a str>,
    history: Vec<Content<'a>>,
    active: &'a str,
}

/// Split `messages` into system instruction, history and active turn.
///
/// The first system message becomes the instruction. Tool messages are not
/// sent. With more than one remaining turn, all but the last form the
/// history; the last turn's text is the active message (empty when there
/// are no turns at all).
fn plan_turns(messages: &[ChatMessage]) -> TurnPlan<'_> {
    let system_instruction = messages
        .iter()
        .find(|msg| msg.role == Role::System)
        .map(ChatMessage::text)
        .filter(|text| !text.is_empty());

    let mut turns: Vec<Content<'_>> = messages
        .iter()
        .filter_map(|msg| match msg.role {
            Role::User => Some(Content::text(Some("user"), msg.text())),
            Role::Assistant => Some(Content::text(Some("model"), msg.text())),
            Role::System | Role::Tool => None,
        })
        .collect();

    let active = turns
        .pop()
        .and_then(|turn| turn.parts.into_iter().next())
        .map_or("", |part| part.text);

    TurnPlan {
        system_instruction,
        history: turns,
        active,
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

impl GenerationConfig {
    /// `None` when no parameter is set.
    fn from_params(params: &GenerationParams) -> Option<Self> {
        let config = Self {
            temperature: params.temperature,
            max_output_tokens: params.max_tokens,
            top_p: params.top_p,
        };
        let empty = config.temperature.is_none()
            && config.max_output_tokens.is_none()
            && config.top_p.is_none();
        (!empty).then_some(config)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &'a GenerationRequest) -> Self {
        let plan = plan_turns(&request.messages);

        let mut contents = plan.history;
        contents.push(Content::text(Some("user"), plan.active));

        Self {
            contents,
            system_instruction: plan.system_instruction.map(|text| Content::text(None, text)),
            generation_config: GenerationConfig::from_params(&request.params),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Adapter for the Gemini `generateContent` API.
#[derive(Debug)]
pub struct GeminiAdapter<B: HttpBackend = ReqwestBackend> {
    config: ProviderClientConfig,
    backend: B,
}

impl GeminiAdapter {
    pub fn new(config: ProviderClientConfig) -> ProviderResult<Self> {
        let backend = ReqwestBackend::new(&config)?;
        Ok(Self::with_backend(config, backend))
    }
}

impl<B: HttpBackend> GeminiAdapter<B> {
    /// Create an adapter over a custom backend.
    pub const fn with_backend(config: ProviderClientConfig, backend: B) -> Self {
        Self { config, backend }
    }

    async fn send(&self, request: &GenerationRequest) -> ProviderResult<CompletionChoice> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, request.model
        );
        let body = serde_json::to_value(GenerateContentRequest::from_request(request))?;
        let headers = [("x-goog-api-key", self.config.api_key.clone())];

        let reply = self.backend.post_json(&url, &headers, &body).await?;
        let response: GenerateContentResponse = serde_json::from_value(reply)?;

        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .map_or_else(
                    || "response contained no candidates".to_string(),
                    |reason| format!("prompt blocked ({reason})"),
                );
            return Err(ProviderError::invalid_response(reason));
        };

        let texts: Vec<String> = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if texts.is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
            return Err(ProviderError::invalid_response(format!(
                "candidate contained no text (finish reason: {reason})"
            )));
        }
        let text = texts.concat();

        Ok(CompletionChoice::assistant(Some(text), None, FinishReason::Stop))
    }
}

#[async_trait]
impl<B: HttpBackend> ProviderAdapter for GeminiAdapter<B> {
    fn provider_name(&self) -> &str {
        ProviderKind::Google.name()
    }

    fn display_name(&self) -> &str {
        ProviderKind::Google.label()
    }

    fn available_models(&self) -> &[&str] {
        GEMINI_MODELS
    }

    async fn complete(&self, request: &GenerationRequest) -> CompletionChoice {
        into_choice(ProviderKind::Google, &request.model, self.send(request).await)
    }
}
