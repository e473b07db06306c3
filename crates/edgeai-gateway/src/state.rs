//! Gateway application state.
//!
//! Built once at startup and shared read-only by every request handler.

use std::sync::Arc;

use edgeai_provider::Provider;

use crate::auth::AccessControl;
use crate::config::GatewayConfig;
use crate::cors::CorsPolicy;

/// Shared application state for the gateway.
pub struct GatewayState {
    /// Gateway configuration.
    pub config: GatewayConfig,
    /// Origin allow-list.
    pub cors: CorsPolicy,
    /// Credential check.
    pub access: AccessControl,
    /// The selected upstream provider.
    pub provider: Arc<dyn Provider>,
}

impl GatewayState {
    /// Create a new gateway state.
    #[must_use]
    pub fn new(config: GatewayConfig, provider: Arc<dyn Provider>) -> Self {
        let cors = CorsPolicy::new(config.allowed_origins.iter().cloned());
        let access = AccessControl::new(config.api_key.clone(), config.trusted_origin.clone());

        Self {
            config,
            cors,
            access,
            provider,
        }
    }
}
