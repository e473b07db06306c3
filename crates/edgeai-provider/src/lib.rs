//! Upstream inference providers for the edgeai gateway.
//!
//! Every provider implements the [`Provider`] trait, which covers the two
//! capabilities the gateway exposes: chat and embeddings.
//!
//! # Architecture
//!
//! ```text
//!                  ┌──────────────────┐
//!                  │     Gateway      │
//!                  └────────┬─────────┘
//!                           │
//!                  ┌────────▼─────────┐
//!                  │     Provider     │
//!                  │     (trait)      │
//!                  └────────┬─────────┘
//!          ┌────────────────┼─────────────────┐
//!          ▼                ▼                 ▼
//!   ┌────────────┐  ┌───────────────┐  ┌──────────────┐
//!   │   Noop     │  │   WorkersAi   │  │ Unconfigured │
//!   │  (echo)    │  │   (HTTPS)     │  │    (501)     │
//!   └────────────┘  └───────────────┘  └──────────────┘
//! ```
//!
//! Providers make at most one upstream call per operation and never retry.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod noop;
pub mod unconfigured;
pub mod workers_ai;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use edgeai_core::{ChatPayload, EmbeddingsInput, EmbeddingsResult, RequestId};

pub use config::{ProviderConfig, ProviderKind, DEFAULT_BASE_URL};
pub use error::{ProviderError, Result};
pub use noop::NoopProvider;
pub use unconfigured::UnconfiguredProvider;
pub use workers_ai::WorkersAiProvider;

/// A chat request as handed to a provider.
#[derive(Debug, Clone)]
pub struct ChatRequest<'a> {
    /// The normalized payload.
    pub payload: ChatPayload,
    /// The body exactly as the client sent it.
    pub raw_body: &'a Map<String, Value>,
    /// Correlation ID of the inbound request.
    pub request_id: RequestId,
}

/// An upstream inference backend.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Identifier reported in response envelopes.
    fn id(&self) -> &str;

    /// Run a chat completion and return the response envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is not configured for chat, the
    /// upstream call fails, or the upstream rejects the request.
    async fn chat(&self, request: ChatRequest<'_>) -> Result<Value>;

    /// Embed one or more texts.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider does not support embeddings, the
    /// upstream call fails, or the upstream response is unusable.
    async fn embeddings(&self, input: EmbeddingsInput) -> Result<EmbeddingsResult>;
}

/// Build the provider selected by the configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client for a remote provider cannot be built.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn Provider>> {
    let provider: Arc<dyn Provider> = match &config.kind {
        ProviderKind::Noop => Arc::new(NoopProvider::new()),
        ProviderKind::WorkersAi => Arc::new(WorkersAiProvider::new(config.clone())?),
        ProviderKind::Unconfigured(selector) => {
            tracing::warn!(selector = %selector, "No known provider selected");
            Arc::new(UnconfiguredProvider::new(selector.clone()))
        }
    };

    tracing::info!(provider = %provider.id(), "Provider initialized");
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_each_variant() {
        let mut config = ProviderConfig {
            kind: ProviderKind::Noop,
            ..ProviderConfig::default()
        };
        assert_eq!(build_provider(&config).unwrap().id(), "noop");

        config.kind = ProviderKind::WorkersAi;
        assert_eq!(
            build_provider(&config).unwrap().id(),
            "cloudflare-workers-ai"
        );

        config.kind = ProviderKind::Unconfigured("mystery".into());
        assert_eq!(build_provider(&config).unwrap().id(), "mystery");
    }
}
