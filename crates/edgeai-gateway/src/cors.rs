//! Cross-origin policy.
//!
//! Origins are matched exactly against the configured allow-list. The
//! middleware answers preflight requests itself and refuses any other
//! request whose origin is missing or unknown, before access control runs.

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ORIGIN, VARY,
};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::state::GatewayState;

/// Methods advertised on every response.
pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

/// Request headers advertised on every response.
pub const ALLOWED_HEADERS: &str = "Authorization, Content-Type, X-Requested-With, X-API-Key";

/// Exact-match origin allow-list.
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    allowed_origins: HashSet<String>,
}

impl CorsPolicy {
    /// Create a policy from the configured origins.
    #[must_use]
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `origin` is present and on the allow-list.
    #[must_use]
    pub fn allows(&self, origin: Option<&str>) -> bool {
        origin.is_some_and(|o| self.allowed_origins.contains(o))
    }

    /// Write the CORS header set for `origin` into `headers`.
    ///
    /// The allow-origin header is only written for allowed origins; the rest
    /// of the set is static.
    pub fn apply(&self, origin: Option<&str>, headers: &mut HeaderMap) {
        if let Some(origin) = origin.filter(|o| self.allowed_origins.contains(*o)) {
            if let Ok(value) = HeaderValue::from_str(origin) {
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
            }
        }
        headers.insert(VARY, HeaderValue::from_static("Origin"));
        headers.append(VARY, HeaderValue::from_static("Access-Control-Request-Headers"));
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
    }
}

/// Read the `Origin` header, if it is valid text.
#[must_use]
pub fn request_origin(headers: &HeaderMap) -> Option<&str> {
    headers.get(ORIGIN).and_then(|v| v.to_str().ok())
}

/// Middleware enforcing the origin policy.
///
/// `OPTIONS` requests end here with 204 or an empty 403. Other requests from
/// unknown origins get a 403 JSON error; the rest continue down the stack.
/// Every response leaving this layer carries the CORS header set.
pub async fn enforce(
    State(state): State<Arc<GatewayState>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request_origin(request.headers()).map(ToString::to_string);
    let allowed = state.cors.allows(origin.as_deref());

    let mut response = if request.method() == Method::OPTIONS {
        if allowed {
            StatusCode::NO_CONTENT.into_response()
        } else {
            tracing::debug!(origin = ?origin, "Preflight from unknown origin");
            StatusCode::FORBIDDEN.into_response()
        }
    } else if allowed {
        next.run(request).await
    } else {
        tracing::debug!(origin = ?origin, "Request from unknown origin");
        ApiError::ForbiddenOrigin.into_response()
    };

    state.cors.apply(origin.as_deref(), response.headers_mut());
    response
}
