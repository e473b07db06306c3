//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::{method_not_allowed, not_found};
use crate::handlers::{chat, embeddings, models, status};
use crate::state::GatewayState;
use crate::{auth, cors, deadline, request_id};

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `GET /version` - Build identifier
/// - `GET /v1/models` - Configured chat and embeddings models
/// - `POST /v1/chat` - Chat completion
/// - `POST /v1/embeddings` - Embeddings
///
/// `OPTIONS` on any path is answered by the CORS layer. Every other request
/// needs an allowed origin and, unless it comes from the trusted origin, a
/// valid `X-API-Key`. Oversized bodies and requests that outlive the
/// configured timeout get JSON errors that still carry the CORS header set.
pub fn create_router(state: GatewayState) -> Router {
    // Extract config values before moving state
    let max_body_bytes = state.config.max_body_bytes;

    let state = Arc::new(state);

    Router::new()
        // Status
        .route("/health", get(status::health).fallback(method_not_allowed))
        .route(
            "/version",
            get(status::version).fallback(method_not_allowed),
        )
        // Inference
        .route(
            "/v1/models",
            get(models::list_models).fallback(method_not_allowed),
        )
        .route("/v1/chat", post(chat::chat).fallback(method_not_allowed))
        .route(
            "/v1/embeddings",
            post(embeddings::embeddings).fallback(method_not_allowed),
        )
        .fallback(not_found)
        // Middleware, innermost first
        .layer(from_fn_with_state(Arc::clone(&state), auth::require_api_key))
        .layer(from_fn_with_state(Arc::clone(&state), deadline::enforce))
        .layer(from_fn_with_state(Arc::clone(&state), cors::enforce))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id::assign))
        .with_state(state)
}
