//! HTTP gateway between browser clients and upstream AI inference providers.
//!
//! This crate provides the public-facing API for chat and embeddings.
//! It handles:
//!
//! - Origin allow-listing and CORS headers
//! - API-key access control with an optional trusted-origin bypass
//! - Normalization of chat input into a canonical payload
//! - Dispatch to the configured provider and error mapping
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Browser clients                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      edgeai-gateway                         │
//! │  ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌────────────┐  │
//! │  │  Request │─▶│   CORS   │─▶│  Access  │─▶│  Router +  │  │
//! │  │    ID    │  │  Policy  │  │ Control  │  │  Handlers  │  │
//! │  └──────────┘  └──────────┘  └──────────┘  └────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                       ┌─────────────┐
//!                       │  Provider   │
//!                       │ (upstream)  │
//!                       └─────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use edgeai_gateway::{create_router, GatewayConfig, GatewayState};
//! use edgeai_provider::build_provider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::from_env()?;
//! let provider = build_provider(&config.provider)?;
//! let listen_addr = config.listen_addr.clone();
//!
//! let app = create_router(GatewayState::new(config, provider));
//!
//! let listener = tokio::net::TcpListener::bind(listen_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod config;
pub mod cors;
pub mod deadline;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod request_id;
pub mod routes;
pub mod state;

pub use auth::AccessControl;
pub use config::{ConfigError, GatewayConfig};
pub use cors::CorsPolicy;
pub use error::ApiError;
pub use routes::create_router;
pub use state::GatewayState;
