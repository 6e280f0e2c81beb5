//! End-to-end tests for the HTTP surface, driven in-process.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use mindbridge_core::ProviderRegistry;
use mindbridge_providers::testing::FakeBackend;
use mindbridge_providers::{OpenAiAdapter, ProviderClientConfig, ProviderKind};
use mindbridge_proxy::{CorsConfig, ProxyConfig};
use serde_json::json;
use std::sync::Arc;

use common::{API_KEY, app, app_with, get, post_json, post_raw, registry, send};

fn chat(model: &str) -> serde_json::Value {
    json!({
        "model": model,
        "messages": [
            {"role": "system", "content": "Be brief."},
            {"role": "user", "content": "Say hello to the world"}
        ]
    })
}

#[tokio::test]
async fn root_and_health_are_public() {
    let (status, _, body) = send(app(), get("/", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "MindBridge Router");
    assert_eq!(body["status"], "operational");

    let (status, _, body) = send(app(), get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "mindbridge-router");
    assert_eq!(body["providers"], json!(["broken", "echo"]));
}

#[tokio::test]
async fn protected_routes_reject_missing_credential() {
    for uri in ["/v1/models", "/providers"] {
        let (status, headers, body) = send(app(), get(uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(headers.get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
        assert_eq!(body["error"]["code"], "missing_api_key");
    }

    let request = Request::builder()
        .method("POST")
        .uri("/v1/chat/completions")
        .body(Body::from(chat("mindbridge:echo/echo-1").to_string()))
        .unwrap();
    let (status, _, _) = send(app(), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_reject_wrong_credential() {
    let (status, headers, body) = send(app(), get("/v1/models", Some("nope"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(headers.contains_key(header::WWW_AUTHENTICATE));
    assert_eq!(body["error"]["message"], "Invalid API key");
}

#[tokio::test]
async fn unconfigured_secret_is_server_error() {
    let app = app_with(registry(), &ProxyConfig::default());
    let (status, _, body) = send(app, get("/v1/models", Some("anything"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["type"], "server_error");
}

#[tokio::test]
async fn models_use_namespaced_ids() {
    let (status, _, body) = send(app(), get("/v1/models", Some(API_KEY))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["object"], "list");

    let served = registry().list_all_models();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    for model in data {
        let owner = model["owned_by"].as_str().unwrap();
        let id = model["id"].as_str().unwrap();
        let name = id
            .strip_prefix(&format!("mindbridge:{owner}/"))
            .unwrap_or_else(|| panic!("unexpected id {id}"));
        assert!(served[owner].iter().any(|m| m == name), "{id}");
        assert_eq!(model["object"], "model");
        assert!(model["created"].as_i64().unwrap() > 0);
    }
}

#[tokio::test]
async fn providers_lists_models_per_provider() {
    let (status, _, body) = send(app(), get("/providers", Some(API_KEY))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["providers"],
        json!({"broken": ["broken-1"], "echo": ["echo-1", "echo-2"]})
    );
}

#[tokio::test]
async fn chat_completion_echoes_model_and_sums_usage() {
    let (status, _, body) = send(
        app(),
        post_json("/v1/chat/completions", &chat("mindbridge:ECHO/echo-1")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "mindbridge:ECHO/echo-1");
    assert_eq!(body["object"], "chat.completion");
    assert!(body["id"].as_str().unwrap().starts_with("chatcmpl-"));

    let choices = body["choices"].as_array().unwrap();
    assert_eq!(choices.len(), 1);
    assert_eq!(choices[0]["index"], 0);
    assert_eq!(choices[0]["message"]["role"], "assistant");
    assert_eq!(choices[0]["message"]["content"], "Say hello to the world");
    assert_eq!(choices[0]["finish_reason"], "stop");

    let usage = &body["usage"];
    // "Be brief. Say hello to the world" = 7 words, completion = 5 words
    assert_eq!(usage["prompt_tokens"], 9);
    assert_eq!(usage["completion_tokens"], 7);
    assert_eq!(usage["total_tokens"], 16);
}

#[tokio::test]
async fn upstream_failure_is_still_ok_with_error_choice() {
    let (status, _, body) = send(
        app(),
        post_json("/v1/chat/completions", &chat("mindbridge:broken/broken-1")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["choices"][0]["finish_reason"], "error");
    assert_eq!(
        body["choices"][0]["message"]["content"],
        "Error calling Echo: connection refused"
    );
    let usage = &body["usage"];
    assert_eq!(
        usage["total_tokens"].as_u64().unwrap(),
        usage["prompt_tokens"].as_u64().unwrap() + usage["completion_tokens"].as_u64().unwrap()
    );
}

#[tokio::test]
async fn unknown_provider_lists_configured_ones() {
    let (status, _, body) = send(
        app(),
        post_json("/v1/chat/completions", &chat("mindbridge:doesnotexist/x")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request_error");
    assert_eq!(body["error"]["code"], "provider_not_configured");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("'doesnotexist'"));
    assert!(message.contains("\"echo\""));
}

#[tokio::test]
async fn unknown_model_lists_available_ones() {
    let (status, _, body) = send(
        app(),
        post_json("/v1/chat/completions", &chat("mindbridge:echo/ECHO-1")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "model_not_found");
    assert!(body["error"]["message"].as_str().unwrap().contains("\"echo-2\""));
}

#[tokio::test]
async fn malformed_model_identifiers_are_rejected() {
    for model in ["gpt-4o", "mindbridge:echo", "openai/gpt-4o"] {
        let (status, _, body) = send(app(), post_json("/v1/chat/completions", &chat(model))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{model}");
        assert!(body["error"]["message"].as_str().unwrap().contains(model));
    }
}

#[tokio::test]
async fn unparseable_body_is_bad_request() {
    let (status, _, body) = send(app(), post_raw("/v1/chat/completions", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body")
    );

    let missing_messages = json!({"model": "mindbridge:echo/echo-1"});
    let (status, _, _) = send(app(), post_json("/v1/chat/completions", &missing_messages)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn out_of_range_parameters_are_bad_request() {
    let mut request = chat("mindbridge:echo/echo-1");
    request["temperature"] = json!(2.5);

    let (status, _, body) = send(app(), post_json("/v1/chat/completions", &request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("temperature"));
}

#[tokio::test]
async fn stream_flag_is_ignored() {
    let mut request = chat("mindbridge:echo/echo-2");
    request["stream"] = json!(true);

    let (status, headers, body) = send(app(), post_json("/v1/chat/completions", &request)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        headers
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("application/json")
    );
    assert_eq!(body["object"], "chat.completion");
}

#[tokio::test]
async fn openai_adapter_through_the_router() {
    let backend = FakeBackend::with_json(json!({
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "Hi there"},
            "finish_reason": "length"
        }]
    }));
    let adapter = OpenAiAdapter::with_backend(
        ProviderClientConfig::new(ProviderKind::OpenAi, "sk-upstream")
            .with_base_url("http://upstream.test"),
        backend.clone(),
    );
    let app = app_with(
        ProviderRegistry::new().with_provider(Arc::new(adapter)),
        &ProxyConfig::default().with_api_key(API_KEY),
    );

    let mut request = chat("mindbridge:openai/gpt-4o-mini");
    request["max_tokens"] = json!(5);
    let (status, _, body) = send(app, post_json("/v1/chat/completions", &request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "mindbridge:openai/gpt-4o-mini");
    assert_eq!(body["choices"][0]["message"]["content"], "Hi there");
    assert_eq!(body["choices"][0]["finish_reason"], "length");

    let sent = backend.last_request().unwrap();
    assert_eq!(sent.header("authorization"), Some("Bearer sk-upstream"));
    assert_eq!(sent.body["model"], "gpt-4o-mini");
    assert_eq!(sent.body["max_tokens"], 5);
    assert_eq!(sent.body["messages"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let app = app_with(
        registry(),
        &ProxyConfig::default()
            .with_api_key(API_KEY)
            .with_cors(CorsConfig::from_list("https://chat.example")),
    );

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/v1/chat/completions")
        .header(header::ORIGIN, "https://chat.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization, content-type")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = send(app, request).await;

    assert!(status == StatusCode::OK || status == StatusCode::NO_CONTENT);
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://chat.example"
    );
}
