//! Edge AI Gateway - HTTP gateway for chat and embeddings
//!
//! This is the main entry point for the gateway service. Configuration is
//! read from the environment once at startup; see `GatewayConfig::from_env`
//! for the variables.
//!
//! # Providers
//!
//! Set `AI_PROVIDER_PRIMARY=noop` to answer chat locally without any
//! upstream, or `AI_PROVIDER_PRIMARY=cloudflare-workers-ai` together with
//! the account, key and model variables to forward to Workers AI. Any other
//! value makes both inference endpoints answer 501.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edgeai_gateway::{create_router, GatewayConfig, GatewayState};
use edgeai_provider::build_provider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,edgeai=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Edge AI Gateway");

    let config = GatewayConfig::from_env()?;

    tracing::info!(
        listen_addr = %config.listen_addr,
        provider = %config.provider.kind.as_str(),
        allowed_origins = ?config.allowed_origins,
        trusted_origin = ?config.trusted_origin,
        git_sha = %config.short_git_sha(),
        "Gateway configuration loaded"
    );

    if config.allowed_origins.is_empty() {
        tracing::warn!("ALLOWED_ORIGINS is empty - every request will be refused");
    }
    if config.api_key.is_empty() && config.trusted_origin.is_none() {
        tracing::warn!("GATEWAY_PUBLIC_KEY is not set - only preflight requests can succeed");
    }

    let provider = build_provider(&config.provider)?;
    let listen_addr = config.listen_addr.clone();

    let app = create_router(GatewayState::new(config, provider));
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = on_signal(tokio::signal::ctrl_c(), "Ctrl-C");

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Wait for `signal`. A listener that fails to install never resolves, so
/// the server keeps running instead of shutting down at startup.
async fn on_signal<F>(signal: F, name: &'static str)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, signal = name, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn failed_listener_never_resolves() {
        let failed = async { Err(std::io::Error::other("signals unavailable")) };
        let outcome = tokio::time::timeout(Duration::from_millis(50), on_signal(failed, "test")).await;
        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn delivered_signal_resolves() {
        let delivered = async { Ok(()) };
        tokio::time::timeout(Duration::from_millis(50), on_signal(delivered, "test"))
            .await
            .unwrap();
    }
}
