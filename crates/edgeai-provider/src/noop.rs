//! Echo provider for local testing and unconfigured deployments.

use async_trait::async_trait;
use serde_json::{json, Value};

use edgeai_core::{EmbeddingsInput, EmbeddingsResult};

use crate::error::{ProviderError, Result};
use crate::{ChatRequest, Provider};

/// Fixed reply returned for every chat request.
pub const NOOP_REPLY: &str = "Hello from gateway";

/// A provider that answers chat without any network call.
///
/// The response echoes the received body so clients can see what the
/// gateway got. Embeddings are not supported.
#[derive(Debug, Clone, Default)]
pub struct NoopProvider;

impl NoopProvider {
    /// Create a new no-op provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Provider for NoopProvider {
    fn id(&self) -> &str {
        "noop"
    }

    async fn chat(&self, request: ChatRequest<'_>) -> Result<Value> {
        tracing::debug!(
            request_id = %request.request_id,
            messages = request.payload.messages.len(),
            "NoopProvider: answering chat locally"
        );

        Ok(json!({
            "reply": NOOP_REPLY,
            "model": "noop",
            "provider": self.id(),
            "requestId": request.request_id,
            "echo": request.raw_body,
        }))
    }

    async fn embeddings(&self, _input: EmbeddingsInput) -> Result<EmbeddingsResult> {
        tracing::warn!("NoopProvider: embeddings called but not supported");
        Err(ProviderError::NotImplemented)
    }
}
