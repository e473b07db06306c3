//! HTTP request handlers.
//!
//! This module contains all the endpoint handlers for the gateway API.

pub mod chat;
pub mod embeddings;
pub mod models;
pub mod status;
