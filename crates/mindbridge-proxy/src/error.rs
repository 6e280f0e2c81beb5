//! HTTP error type and its mapping to OpenAI-style error bodies.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use mindbridge_core::CoreError;
use thiserror::Error;

use crate::models::ErrorResponse;

/// Errors the HTTP surface returns to callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller can fix the request.
    #[error("{message}")]
    BadRequest {
        message: String,
        code: Option<&'static str>,
    },

    /// Missing or wrong bearer credential.
    #[error("{message}")]
    Unauthorized {
        message: String,
        code: &'static str,
    },

    /// Something on our side is wrong.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: None,
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        let body = match &self {
            Self::BadRequest { code, .. } => {
                ErrorResponse::new(message, "invalid_request_error").with_code(*code)
            }
            Self::Unauthorized { code, .. } => {
                ErrorResponse::new(message, "invalid_request_error").with_code(Some(*code))
            }
            Self::Internal(_) => ErrorResponse::new(message, "server_error"),
        };

        let mut response = (status, Json(body)).into_response();
        if matches!(self, Self::Unauthorized { .. }) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        if !err.is_client_error() {
            return Self::Internal(err.to_string());
        }

        let code = match &err {
            CoreError::ProviderNotConfigured { .. } => Some("provider_not_configured"),
            CoreError::ModelNotAvailable { .. } => Some("model_not_found"),
            CoreError::Validation(_) | CoreError::Internal(_) => None,
        };

        Self::BadRequest {
            message: err.to_string(),
            code,
        }
    }
}
