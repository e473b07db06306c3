//! Provider configuration types.

use std::time::Duration;

/// Default base URL for the Workers AI REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4/accounts";

/// The closed set of provider variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    /// Built-in echo provider; makes no network calls.
    Noop,
    /// Workers AI reachable over HTTP.
    WorkersAi,
    /// No provider selected, or an unknown selector.
    Unconfigured(String),
}

impl ProviderKind {
    /// Parse a provider selector.
    #[must_use]
    pub fn parse(selector: &str) -> Self {
        match selector.trim() {
            "noop" => Self::Noop,
            "cloudflare-workers-ai" => Self::WorkersAi,
            other => Self::Unconfigured(other.to_string()),
        }
    }

    /// Stable identifier reported to clients.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Noop => "noop",
            Self::WorkersAi => "cloudflare-workers-ai",
            Self::Unconfigured(selector) => selector,
        }
    }
}

/// Configuration for the upstream provider.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Selected provider.
    pub kind: ProviderKind,
    /// Provider account identifier.
    pub account_id: String,
    /// Bearer credential for the provider.
    pub api_key: String,
    /// Default chat model.
    pub chat_model: Option<String>,
    /// Embeddings model.
    pub embeddings_model: Option<String>,
    /// Base URL that run endpoints are built from.
    pub base_url: String,
    /// Timeout for a single upstream call, in seconds.
    pub timeout_seconds: u64,
}

impl ProviderConfig {
    /// Get the upstream timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("account_id", &self.account_id)
            .field("api_key", &"<redacted>")
            .field("chat_model", &self.chat_model)
            .field("embeddings_model", &self.embeddings_model)
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Unconfigured(String::new()),
            account_id: String::new(),
            api_key: String::new(),
            chat_model: None,
            embeddings_model: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}
