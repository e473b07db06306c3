//! Placeholder provider for missing or unknown selectors.

use async_trait::async_trait;
use serde_json::Value;

use edgeai_core::{EmbeddingsInput, EmbeddingsResult};

use crate::error::{ProviderError, Result};
use crate::{ChatRequest, Provider};

/// A provider that rejects every operation as not implemented.
#[derive(Debug, Clone, Default)]
pub struct UnconfiguredProvider {
    selector: String,
}

impl UnconfiguredProvider {
    /// Create a provider standing in for `selector`.
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }
}

#[async_trait]
impl Provider for UnconfiguredProvider {
    fn id(&self) -> &str {
        &self.selector
    }

    async fn chat(&self, _request: ChatRequest<'_>) -> Result<Value> {
        Err(ProviderError::NotImplemented)
    }

    async fn embeddings(&self, _input: EmbeddingsInput) -> Result<EmbeddingsResult> {
        Err(ProviderError::NotImplemented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeai_core::{normalize_chat_payload, RequestId};
    use serde_json::Map;

    #[tokio::test]
    async fn rejects_both_operations() {
        let provider = UnconfiguredProvider::new("openai");
        let body = Map::new();

        let chat = provider
            .chat(ChatRequest {
                payload: normalize_chat_payload(&body),
                raw_body: &body,
                request_id: RequestId::generate(),
            })
            .await;
        assert!(matches!(chat, Err(ProviderError::NotImplemented)));

        let embeddings = provider
            .embeddings(EmbeddingsInput::Batch(vec!["a".into()]))
            .await;
        assert!(matches!(embeddings, Err(ProviderError::NotImplemented)));
    }
}
