//! API-key access control.
//!
//! Runs after the origin policy, so every request reaching it already has an
//! allowed origin. The `X-API-Key` header must equal the configured key
//! unless the request comes from the configured trusted origin.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;

use crate::cors::request_origin;
use crate::error::ApiError;
use crate::state::GatewayState;

/// Header carrying the gateway credential.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Credential check with an optional trusted-origin bypass.
#[derive(Clone, Default)]
pub struct AccessControl {
    api_key: String,
    trusted_origin: Option<String>,
}

impl AccessControl {
    /// Create an access check for `api_key`.
    #[must_use]
    pub fn new(api_key: impl Into<String>, trusted_origin: Option<String>) -> Self {
        Self {
            api_key: api_key.into(),
            trusted_origin,
        }
    }

    /// Whether a request from `origin` presenting `key` is admitted.
    ///
    /// An empty or absent key never matches, even when no key is configured.
    #[must_use]
    pub fn admits(&self, origin: Option<&str>, key: Option<&str>) -> bool {
        if self
            .trusted_origin
            .as_deref()
            .is_some_and(|trusted| origin == Some(trusted))
        {
            return true;
        }

        match key {
            Some(key) if !key.is_empty() && !self.api_key.is_empty() => {
                key.as_bytes().ct_eq(self.api_key.as_bytes()).into()
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for AccessControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessControl")
            .field("api_key", &"<redacted>")
            .field("trusted_origin", &self.trusted_origin)
            .finish()
    }
}

/// Read the presented credential, if it is valid text.
#[must_use]
pub fn presented_key(headers: &HeaderMap) -> Option<&str> {
    headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok())
}

/// Middleware rejecting requests that fail the credential check.
pub async fn require_api_key(
    State(state): State<Arc<GatewayState>>,
    request: Request,
    next: Next,
) -> Response {
    let headers = request.headers();
    if state
        .access
        .admits(request_origin(headers), presented_key(headers))
    {
        next.run(request).await
    } else {
        tracing::debug!(path = %request.uri().path(), "Rejected request with invalid API key");
        ApiError::Unauthorized.into_response()
    }
}
