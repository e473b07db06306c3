//! Model listing endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::GatewayState;

/// Models a client may select, per capability.
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    /// Chat model identifiers.
    pub chat: Vec<String>,
    /// Embeddings model identifiers.
    pub embeddings: Vec<String>,
}

/// List the configured models. Makes no upstream call.
pub async fn list_models(State(state): State<Arc<GatewayState>>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        chat: state.config.chat_models.clone(),
        embeddings: state.config.embeddings_models.clone(),
    })
}
