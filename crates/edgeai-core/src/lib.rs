//! Core types and utilities for the edgeai gateway.
//!
//! This crate provides the request-scoped data model shared by the gateway
//! and its providers:
//!
//! - **Identifiers**: the per-request correlation ID
//! - **Chat types**: role-tagged messages and the canonical chat payload
//! - **Embeddings types**: the embeddings input and result shapes
//! - **Normalization**: reshaping arbitrary client JSON into a chat payload
//!
//! # Example
//!
//! ```
//! use edgeai_core::normalize_chat_payload;
//! use serde_json::json;
//!
//! let body = json!({ "prompt": "Summarize this", "temperature": 0.2 });
//! let payload = normalize_chat_payload(body.as_object().unwrap());
//!
//! assert_eq!(payload.messages.len(), 1);
//! assert_eq!(payload.messages[0]["role"], "user");
//! assert_eq!(payload.messages[0]["content"], "Summarize this");
//! assert_eq!(payload.temperature, Some(0.2));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod normalize;
pub mod types;

pub use error::{InputError, Result};
pub use ids::RequestId;
pub use normalize::{normalize_chat_payload, ClientInput, PLACEHOLDER_CONTENT};
pub use types::{
    ChatMessage, ChatPayload, EmbeddingItem, EmbeddingsInput, EmbeddingsResult, Role,
};
