//! HTTP backend abstraction for upstream APIs.
//!
//! Adapters are generic over [`HttpBackend`] so request building and
//! response normalization can be tested without a network. The production
//! implementation is [`ReqwestBackend`].

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::ProviderClientConfig;
use crate::error::{ProviderError, ProviderResult};

/// Upper bound on how much of a non-JSON error body is echoed back.
const MAX_ERROR_BODY_CHARS: usize = 500;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Transport that POSTs a JSON body and returns the decoded JSON reply.
///
/// Non-2xx replies are reported as [`ProviderError::Api`].
#[async_trait]
pub trait HttpBackend: Send + Sync + fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: &Value,
    ) -> ProviderResult<Value>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// The configured timeout covers the whole request; hitting it surfaces as
/// [`ProviderError::Network`].
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(config: &ProviderClientConfig) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: &Value,
    ) -> ProviderResult<Value> {
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(url, status = status.as_u16(), "Upstream responded");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body: upstream_error_message(&text)
                    .or_else(|| status.canonical_reason().map(str::to_string))
                    .unwrap_or_default(),
            });
        }

        decode_success_body(&response.text().await?)
    }
}

/// Decode a 2xx body. A non-JSON payload is a parse error, not a
/// transport failure.
pub(crate) fn decode_success_body(text: &str) -> ProviderResult<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Pull a human-readable message out of an upstream error body.
///
/// All three vendors nest it under `error.message`; anything else is
/// returned trimmed and truncated. `None` for an empty body.
pub(crate) fn upstream_error_message(body: &str) -> Option<String> {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(message) = json
            .pointer("/error/message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
        {
            return Some(message.to_string());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect())
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    use super::*;
    use std::sync::{Arc, Mutex, PoisonError};

    /// One request the fake backend received.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRequest {
        pub url: String,
        pub headers: Vec<(String, String)>,
        pub body: Value,
    }

    impl RecordedRequest {
        /// Value of the first header named `name` (case-insensitive).
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        }
    }

    #[derive(Debug, Clone)]
    enum Reply {
        Json(Value),
        Status { status: u16, body: String },
    }

    /// A fake HTTP backend that returns one canned reply and records every
    /// request. Clones share the request log.
    #[derive(Debug, Clone)]
    pub struct FakeBackend {
        reply: Reply,
        requests: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    impl FakeBackend {
        /// Answer every request with `json`.
        pub fn with_json(json: Value) -> Self {
            Self {
                reply: Reply::Json(json),
                requests: Arc::default(),
            }
        }

        /// Fail every request with an upstream status and message.
        pub fn with_status(status: u16, body: impl Into<String>) -> Self {
            Self {
                reply: Reply::Status {
                    status,
                    body: body.into(),
                },
                requests: Arc::default(),
            }
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        pub fn last_request(&self) -> Option<RecordedRequest> {
            self.requests().pop()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn post_json(
            &self,
            url: &str,
            headers: &[(&'static str, String)],
            body: &Value,
        ) -> ProviderResult<Value> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(RecordedRequest {
                    url: url.to_string(),
                    headers: headers
                        .iter()
                        .map(|(k, v)| ((*k).to_string(), v.clone()))
                        .collect(),
                    body: body.clone(),
                });

            match &self.reply {
                Reply::Json(json) => Ok(json.clone()),
                Reply::Status { status, body } => Err(ProviderError::Api {
                    status: *status,
                    body: body.clone(),
                }),
            }
        }
    }
}
