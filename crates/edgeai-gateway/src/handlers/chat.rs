//! Chat endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::{Extension, Json};
use serde_json::Value;

use edgeai_core::{normalize_chat_payload, RequestId};
use edgeai_provider::ChatRequest;

use crate::error::{ApiError, Operation};
use crate::extract::LenientJson;
use crate::state::GatewayState;

/// Normalize the body and dispatch it to the provider.
///
/// # Errors
///
/// Returns `BadRequest` when the body names a model outside the advertised
/// chat models, `NotImplemented` when no provider supports chat, and
/// `UpstreamFailure` when the provider call fails.
pub async fn chat(
    State(state): State<Arc<GatewayState>>,
    Extension(request_id): Extension<RequestId>,
    LenientJson(body): LenientJson,
) -> Result<Json<Value>, ApiError> {
    let payload = normalize_chat_payload(&body);

    if let Some(model) = payload.model.as_deref() {
        if !state.config.chat_models.iter().any(|m| m == model) {
            return Err(ApiError::BadRequest(format!("model {model} is not offered")));
        }
    }

    tracing::debug!(
        provider = %state.provider.id(),
        messages = payload.messages.len(),
        model = ?payload.model,
        "Dispatching chat"
    );

    let envelope = state
        .provider
        .chat(ChatRequest {
            payload,
            raw_body: &body,
            request_id,
        })
        .await
        .map_err(|e| ApiError::from_provider(Operation::Chat, e))?;

    Ok(Json(envelope))
}
