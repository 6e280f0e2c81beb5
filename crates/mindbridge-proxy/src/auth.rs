//! Bearer-token Auth Gate.
//!
//! Every protected route expects `Authorization: Bearer <secret>` where the
//! secret comes from process configuration. The gate answers only "allowed"
//! or one of three failures; the router decides which routes it guards.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::error::ApiError;

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("Missing API key. Send 'Authorization: Bearer <key>'")]
    Missing,

    #[error("Invalid API key")]
    Invalid,

    #[error("Server configuration error: MINDBRIDGE_API_KEY not set")]
    Misconfigured,
}

impl From<AuthFailure> for ApiError {
    fn from(failure: AuthFailure) -> Self {
        let code = match failure {
            AuthFailure::Missing => "missing_api_key",
            AuthFailure::Invalid => "invalid_api_key",
            AuthFailure::Misconfigured => return Self::Internal(failure.to_string()),
        };
        Self::Unauthorized {
            message: failure.to_string(),
            code,
        }
    }
}

/// Compares the presented bearer token against the configured secret.
#[derive(Clone)]
pub struct AuthGate {
    expected: Option<Arc<str>>,
}

impl AuthGate {
    /// A gate with no secret rejects every request as misconfigured.
    pub fn new(expected: Option<&str>) -> Self {
        Self {
            expected: expected.filter(|key| !key.is_empty()).map(Arc::from),
        }
    }

    pub const fn is_configured(&self) -> bool {
        self.expected.is_some()
    }

    /// Decide on a raw `Authorization` header value.
    ///
    /// A missing or non-bearer header is reported before the server's own
    /// configuration is looked at.
    pub fn check(&self, authorization: Option<&str>) -> Result<(), AuthFailure> {
        let token = authorization
            .and_then(bearer_token)
            .ok_or(AuthFailure::Missing)?;

        let expected = self.expected.as_deref().ok_or(AuthFailure::Misconfigured)?;

        if token == expected {
            Ok(())
        } else {
            Err(AuthFailure::Invalid)
        }
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("configured", &self.is_configured())
            .finish()
    }
}

/// Extract the token from `Bearer <token>`; the scheme is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Middleware guarding a route with the [`AuthGate`].
pub async fn require_bearer(State(gate): State<AuthGate>, req: Request, next: Next) -> Response {
    let presented = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match gate.check(presented) {
        Ok(()) => next.run(req).await,
        Err(failure) => {
            let path = req.uri().path();
            if failure == AuthFailure::Misconfigured {
                error!(path, "Rejecting request: no gateway API key configured");
            } else {
                warn!(path, reason = %failure, "Unauthorized request");
            }
            ApiError::from(failure).into_response()
        }
    }
}
