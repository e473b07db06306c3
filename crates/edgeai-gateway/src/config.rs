//! Gateway configuration types.
//!
//! Configuration is read once from the environment at startup and never
//! changes afterwards.

use std::time::Duration;

use thiserror::Error;

use edgeai_provider::{ProviderConfig, ProviderKind, DEFAULT_BASE_URL};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set to a value that could not be parsed.
    #[error("invalid value for {var}: {reason}")]
    Invalid {
        /// Name of the variable.
        var: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Configuration for the gateway service.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Listen address (e.g., "0.0.0.0:8080").
    pub listen_addr: String,

    /// Origins allowed to call the gateway, matched exactly.
    pub allowed_origins: Vec<String>,

    /// Credential expected in `X-API-Key`.
    pub api_key: String,

    /// Origin allowed to skip the credential check.
    pub trusted_origin: Option<String>,

    /// Build identifier reported by `/version`.
    pub git_sha: Option<String>,

    /// Chat models advertised by `/v1/models`.
    pub chat_models: Vec<String>,

    /// Embeddings models advertised by `/v1/models`.
    pub embeddings_models: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Upstream provider settings.
    pub provider: ProviderConfig,
}

impl GatewayConfig {
    fn default_listen_addr() -> String {
        "0.0.0.0:8080".to_string()
    }

    const fn default_max_body() -> usize {
        1024 * 1024 // 1 MB
    }

    const fn default_request_timeout() -> u64 {
        30
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, treating empty values as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let chat_model = get("AI_MODEL_CHAT_PRIMARY");
        let embeddings_model = get("AI_MODEL_EMBEDDINGS_PRIMARY");

        let provider = ProviderConfig {
            kind: ProviderKind::parse(&get("AI_PROVIDER_PRIMARY").unwrap_or_default()),
            account_id: get("AI_ACCOUNT_ID_PRIMARY").unwrap_or_default(),
            api_key: get("AI_API_KEY_PRIMARY").unwrap_or_default(),
            chat_model: chat_model.clone(),
            embeddings_model: embeddings_model.clone(),
            base_url: get("AI_PROVIDER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_seconds: parse_var("UPSTREAM_TIMEOUT_SECONDS", get("UPSTREAM_TIMEOUT_SECONDS"))?
                .unwrap_or(30),
        };

        Ok(Self {
            listen_addr: get("LISTEN_ADDR").unwrap_or_else(Self::default_listen_addr),
            allowed_origins: split_list(get("ALLOWED_ORIGINS")),
            api_key: get("GATEWAY_PUBLIC_KEY").unwrap_or_default(),
            trusted_origin: get("TRUSTED_ORIGIN"),
            git_sha: get("GIT_SHA"),
            chat_models: model_list(get("AI_MODELS_CHAT"), chat_model),
            embeddings_models: model_list(get("AI_MODELS_EMBEDDINGS"), embeddings_model),
            max_body_bytes: parse_var("MAX_BODY_BYTES", get("MAX_BODY_BYTES"))?
                .unwrap_or_else(Self::default_max_body),
            request_timeout_seconds: parse_var(
                "REQUEST_TIMEOUT_SECONDS",
                get("REQUEST_TIMEOUT_SECONDS"),
            )?
            .unwrap_or_else(Self::default_request_timeout),
            provider,
        })
    }

    /// Get the request timeout as a `Duration`.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Build identifier shortened to seven characters, or `"unknown"`.
    #[must_use]
    pub fn short_git_sha(&self) -> String {
        self.git_sha
            .as_deref()
            .map_or_else(|| "unknown".to_string(), |sha| sha.chars().take(7).collect())
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("listen_addr", &self.listen_addr)
            .field("allowed_origins", &self.allowed_origins)
            .field("api_key", &"<redacted>")
            .field("trusted_origin", &self.trusted_origin)
            .field("git_sha", &self.git_sha)
            .field("chat_models", &self.chat_models)
            .field("embeddings_models", &self.embeddings_models)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("provider", &self.provider)
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            allowed_origins: Vec::new(),
            api_key: String::new(),
            trusted_origin: None,
            git_sha: None,
            chat_models: Vec::new(),
            embeddings_models: Vec::new(),
            max_body_bytes: Self::default_max_body(),
            request_timeout_seconds: Self::default_request_timeout(),
            provider: ProviderConfig::default(),
        }
    }
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// An explicit list wins; otherwise the configured default model, if any.
fn model_list(explicit: Option<String>, default: Option<String>) -> Vec<String> {
    let list = split_list(explicit);
    if list.is_empty() {
        default.into_iter().collect()
    } else {
        list
    }
}

fn parse_var<T>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|v| {
            v.parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                reason: e.to_string(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<GatewayConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        GatewayConfig::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn timeout_duration() {
        let config = GatewayConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(
            config.provider.kind,
            ProviderKind::Unconfigured(String::new())
        );
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert!(config.chat_models.is_empty());
        assert_eq!(config.short_git_sha(), "unknown");
    }

    #[test]
    fn loads_full_environment() {
        let config = load(&[
            ("AI_PROVIDER_PRIMARY", "cloudflare-workers-ai"),
            ("AI_ACCOUNT_ID_PRIMARY", "acct"),
            ("AI_API_KEY_PRIMARY", "upstream"),
            ("AI_MODEL_CHAT_PRIMARY", "@cf/meta/llama"),
            ("AI_MODEL_EMBEDDINGS_PRIMARY", "@cf/baai/bge"),
            ("ALLOWED_ORIGINS", "http://localhost:4200, https://app.example.com"),
            ("GATEWAY_PUBLIC_KEY", "gw-key"),
            ("TRUSTED_ORIGIN", "https://app.example.com"),
            ("GIT_SHA", "0123456789abcdef"),
            ("MAX_BODY_BYTES", "2048"),
        ])
        .unwrap();

        assert_eq!(config.provider.kind, ProviderKind::WorkersAi);
        assert_eq!(config.provider.account_id, "acct");
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:4200", "https://app.example.com"]
        );
        assert_eq!(config.api_key, "gw-key");
        assert_eq!(config.trusted_origin.as_deref(), Some("https://app.example.com"));
        assert_eq!(config.short_git_sha(), "0123456");
        assert_eq!(config.max_body_bytes, 2048);
        assert_eq!(config.chat_models, vec!["@cf/meta/llama"]);
        assert_eq!(config.embeddings_models, vec!["@cf/baai/bge"]);
    }

    #[test]
    fn explicit_model_lists_win() {
        let config = load(&[
            ("AI_MODEL_CHAT_PRIMARY", "a"),
            ("AI_MODELS_CHAT", "a,b,,c"),
        ])
        .unwrap();
        assert_eq!(config.chat_models, vec!["a", "b", "c"]);
    }

    #[test]
    fn blank_values_are_unset() {
        let config = load(&[("TRUSTED_ORIGIN", "  "), ("GIT_SHA", "")]).unwrap();
        assert!(config.trusted_origin.is_none());
        assert_eq!(config.short_git_sha(), "unknown");
    }

    #[test]
    fn invalid_number_is_rejected() {
        let err = load(&[("REQUEST_TIMEOUT_SECONDS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("REQUEST_TIMEOUT_SECONDS"));
    }

    #[test]
    fn debug_redacts_keys() {
        let config = load(&[("GATEWAY_PUBLIC_KEY", "gw-secret")]).unwrap();
        assert!(!format!("{config:?}").contains("gw-secret"));
    }
}
