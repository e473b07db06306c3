//! Provider error types.

use thiserror::Error;

/// A result type using `ProviderError`.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors returned by provider implementations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The selected provider does not support this operation.
    #[error("provider not implemented")]
    NotImplemented,

    /// A setting required by the operation is missing.
    #[error("{0} is not set")]
    NotConfigured(&'static str),

    /// The requested model name cannot address a run endpoint.
    #[error("invalid model name: {0}")]
    InvalidModel(String),

    /// The request never produced an upstream response.
    #[error("upstream request failed: {0}")]
    Request(String),

    /// The upstream answered with a non-success status.
    #[error("{message}")]
    Upstream {
        /// HTTP status returned by the upstream.
        status: u16,
        /// Upstream error text, or a generic description.
        message: String,
    },

    /// The upstream answered successfully but the body was unusable.
    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),
}
