//! Shared fixtures for router tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use mindbridge_core::{
    ChatDispatcher, ChatMessage, CompletionChoice, FinishReason, GenerationRequest,
    ProviderAdapter, ProviderRegistry,
};
use mindbridge_proxy::{ProxyConfig, create_router};
use serde_json::Value;
use tower::ServiceExt;

pub const API_KEY: &str = "test-gateway-key";

/// Adapter that answers with the last message's text, or fails on demand.
#[derive(Debug)]
pub struct EchoAdapter {
    pub name: &'static str,
    pub models: &'static [&'static str],
    pub fail: bool,
}

#[async_trait]
impl ProviderAdapter for EchoAdapter {
    fn provider_name(&self) -> &str {
        self.name
    }

    fn display_name(&self) -> &str {
        "Echo"
    }

    fn available_models(&self) -> &[&str] {
        self.models
    }

    async fn complete(&self, request: &GenerationRequest) -> CompletionChoice {
        if self.fail {
            return CompletionChoice::upstream_error(self.display_name(), "connection refused");
        }
        let text = request
            .messages
            .last()
            .map(ChatMessage::text)
            .unwrap_or_default();
        CompletionChoice::assistant(Some(text.to_string()), None, FinishReason::Stop)
    }
}

pub fn registry() -> ProviderRegistry {
    ProviderRegistry::new()
        .with_provider(Arc::new(EchoAdapter {
            name: "echo",
            models: &["echo-1", "echo-2"],
            fail: false,
        }))
        .with_provider(Arc::new(EchoAdapter {
            name: "broken",
            models: &["broken-1"],
            fail: true,
        }))
}

pub fn app_with(registry: ProviderRegistry, config: &ProxyConfig) -> Router {
    create_router(ChatDispatcher::new(Arc::new(registry)), config)
}

pub fn app() -> Router {
    app_with(registry(), &ProxyConfig::default().with_api_key(API_KEY))
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    post_raw(uri, body.to_string())
}

pub fn post_raw(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {API_KEY}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

/// Run one request and decode the JSON body (`Value::Null` when empty).
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, json)
}
