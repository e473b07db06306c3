//! API error types and responses.
//!
//! Every error is rendered as a complete JSON body of the form
//! `{"error": "<message>"}`, with a `detail` field for dispatch failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use edgeai_core::InputError;
use edgeai_provider::ProviderError;

/// The operation a dispatch failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `POST /v1/chat`.
    Chat,
    /// `POST /v1/embeddings`.
    Embeddings,
}

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request origin is missing or not allowed.
    #[error("forbidden")]
    ForbiddenOrigin,

    /// Missing or invalid API key.
    #[error("unauthorized")]
    Unauthorized,

    /// Missing or malformed client input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request body exceeds the configured size limit.
    #[error("payload too large")]
    PayloadTooLarge,

    /// The request did not complete within the configured deadline.
    #[error("request timed out")]
    RequestTimeout,

    /// The selected provider does not support the operation.
    #[error("provider not implemented")]
    NotImplemented,

    /// The upstream call failed or was rejected.
    #[error("{operation:?} failed: {detail}")]
    UpstreamFailure {
        /// Which endpoint failed.
        operation: Operation,
        /// Underlying error text.
        detail: String,
    },

    /// No route matches the path.
    #[error("not found")]
    NotFound,

    /// The path exists but not for this method.
    #[error("method not allowed")]
    MethodNotAllowed,
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ApiError {
    /// Map a provider error raised while serving `operation`.
    #[must_use]
    pub fn from_provider(operation: Operation, err: ProviderError) -> Self {
        match err {
            ProviderError::NotImplemented => Self::NotImplemented,
            ProviderError::InvalidModel(model) => {
                Self::BadRequest(format!("model {model} cannot be addressed"))
            }
            other => {
                tracing::error!(operation = ?operation, error = %other, "Provider dispatch failed");
                Self::UpstreamFailure {
                    operation,
                    detail: other.to_string(),
                }
            }
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::ForbiddenOrigin => StatusCode::FORBIDDEN,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            Self::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            Self::UpstreamFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Get the client-facing message for this error.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ForbiddenOrigin => "Forbidden",
            Self::Unauthorized => "Unauthorized",
            Self::BadRequest(_) => "Bad request",
            Self::PayloadTooLarge => "Payload too large",
            Self::RequestTimeout => "Request timeout",
            Self::NotImplemented => "Provider not implemented",
            Self::UpstreamFailure {
                operation: Operation::Chat,
                ..
            } => "Chat failed",
            Self::UpstreamFailure {
                operation: Operation::Embeddings,
                ..
            } => "Embeddings failed",
            Self::NotFound => "Not found",
            Self::MethodNotAllowed => "Method Not Allowed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = self.message();

        let detail = match self {
            Self::UpstreamFailure { detail, .. } => Some(detail),
            Self::BadRequest(reason) => {
                tracing::debug!(reason = %reason, "Bad request");
                None
            }
            _ => None,
        };

        (status, Json(ErrorResponse { error, detail })).into_response()
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

/// Fallback for paths with no route.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
