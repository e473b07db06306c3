//! Request deadline.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::state::GatewayState;

/// Middleware bounding the time spent below it.
///
/// Sits inside the CORS layer so a timed-out request still carries the CORS
/// header set. Dropping the inner future aborts any in-flight upstream call.
pub async fn enforce(
    State(state): State<Arc<GatewayState>>,
    request: Request,
    next: Next,
) -> Response {
    let limit = state.config.request_timeout();
    let path = request.uri().path().to_string();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(path = %path, timeout_secs = limit.as_secs(), "Request timed out");
            ApiError::RequestTimeout.into_response()
        }
    }
}
