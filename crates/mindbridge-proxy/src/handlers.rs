//! Route handlers.

use axum::Json;
use axum::extract::State;
use bytes::Bytes;
use chrono::Utc;
use mindbridge_core::ChatCompletion;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{
    ChatCompletionRequest, HealthResponse, ModelsResponse, ProvidersResponse, SERVICE_ID,
    SERVICE_NAME, ServiceInfo, VERSION,
};
use crate::state::AppState;

/// Service banner.
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        version: VERSION,
        status: "operational",
    })
}

/// Liveness plus the configured provider names.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_ID,
        version: VERSION,
        providers: state.registry().list_configured(),
    })
}

/// List every routable model in OpenAI format.
pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    debug!("GET /v1/models");
    Json(ModelsResponse::from_registry(
        state.registry(),
        Utc::now().timestamp(),
    ))
}

/// Provider-to-models map for operators.
pub async fn list_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        providers: state.registry().list_all_models(),
    })
}

/// Run a chat completion against the provider named in `model`.
///
/// The body is parsed here rather than by the `Json` extractor so malformed
/// input gets the OpenAI error envelope.
pub async fn chat_completions(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatCompletion>, ApiError> {
    let request: ChatCompletionRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Rejecting unparseable chat completion body");
        ApiError::bad_request(format!("Invalid request body: {e}"))
    })?;

    if request.stream {
        debug!(model = %request.model, "Streaming requested; returning a single response");
    }

    let completion = state
        .dispatcher
        .dispatch(&request.model, request.messages, request.params)
        .await
        .inspect_err(|e| debug!(model = %request.model, error = %e, "Rejected chat completion"))?;

    Ok(Json(completion))
}
