//! Router assembly.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::middleware;
use axum::routing::{get, post};
use mindbridge_core::ChatDispatcher;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::auth::{AuthGate, require_bearer};
use crate::config::{CorsConfig, ProxyConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
///
/// An explicit origin list also allows credentials; allow-all does not.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| {
                    o.parse()
                        .inspect_err(|_| warn!(origin = %o, "Ignoring invalid CORS origin"))
                        .ok()
                })
                .collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
                .allow_credentials(true)
        }
    }
}

/// Create the full router.
///
/// `/` and `/health` are public; every other route sits behind the bearer
/// Auth Gate. CORS and request tracing apply to all routes.
pub fn create_router(dispatcher: ChatDispatcher, config: &ProxyConfig) -> Router {
    let state = AppState::new(dispatcher);
    let gate = AuthGate::new(config.api_key.as_deref());
    if !gate.is_configured() {
        warn!("No gateway API key configured; authenticated routes will answer 500");
    }

    let protected = Router::new()
        .route("/v1/models", get(handlers::list_models))
        .route("/v1/chat/completions", post(handlers::chat_completions))
        .route("/providers", get(handlers::list_providers))
        .route_layer(middleware::from_fn_with_state(gate, require_bearer));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(protected)
        .with_state(state)
        .layer(build_cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
}
