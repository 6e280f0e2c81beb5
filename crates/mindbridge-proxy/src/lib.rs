//! OpenAI-compatible HTTP surface for the mindbridge router.
//!
//! | Route | Auth | Purpose |
//! |---|---|---|
//! | `GET /` | no | service banner |
//! | `GET /health` | no | liveness and configured providers |
//! | `GET /v1/models` | bearer | every `mindbridge:<provider>/<model>` |
//! | `POST /v1/chat/completions` | bearer | dispatch one chat completion |
//! | `GET /providers` | bearer | provider-to-models map |
//!
//! The crate knows nothing about concrete providers: it is handed a
//! [`mindbridge_core::ChatDispatcher`] by the composition root.

#![deny(unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{CorsConfig, DEFAULT_HOST, DEFAULT_PORT, ProxyConfig};
pub use routes::create_router;
pub use server::serve;

// Silence unused dev-dependency warnings
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use mindbridge_providers as _;
#[cfg(test)]
use tower as _;
