//! Embeddings endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use edgeai_core::{EmbeddingsInput, EmbeddingsResult};

use crate::error::{ApiError, Operation};
use crate::extract::LenientJson;
use crate::state::GatewayState;

/// Validate `input` and dispatch it to the provider.
///
/// # Errors
///
/// Returns `BadRequest` before any upstream call when `input` is missing or
/// malformed, `NotImplemented` when no provider supports embeddings, and
/// `UpstreamFailure` when the provider call fails.
pub async fn embeddings(
    State(state): State<Arc<GatewayState>>,
    LenientJson(body): LenientJson,
) -> Result<Json<EmbeddingsResult>, ApiError> {
    let input = EmbeddingsInput::from_body(&body)?;

    tracing::debug!(
        provider = %state.provider.id(),
        inputs = input.len(),
        "Dispatching embeddings"
    );

    let result = state
        .provider
        .embeddings(input)
        .await
        .map_err(|e| ApiError::from_provider(Operation::Embeddings, e))?;

    Ok(Json(result))
}
