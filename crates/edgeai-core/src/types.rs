//! Chat and embeddings data model.
//!
//! These types are transient: each one lives for a single request/response
//! cycle and is never stored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{InputError, Result};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the conversation.
    System,
    /// A turn written by the end user.
    User,
    /// A turn produced by the model.
    Assistant,
}

impl Role {
    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: Role,
    /// The text content.
    pub content: String,
}

impl ChatMessage {
    /// Create a `user` message with the given content.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

impl From<ChatMessage> for Value {
    fn from(message: ChatMessage) -> Self {
        let mut fields = Map::new();
        fields.insert("role".into(), Value::String(message.role.as_str().to_string()));
        fields.insert("content".into(), Value::String(message.content));
        Self::Object(fields)
    }
}

/// Canonical chat payload sent to providers.
///
/// `messages` is never empty once produced by
/// [`normalize_chat_payload`](crate::normalize_chat_payload).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatPayload {
    /// Ordered conversation turns. A client-supplied list is carried exactly
    /// as received; synthesized turns are [`ChatMessage`] values.
    pub messages: Vec<Value>,

    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Nucleus-sampling probability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    /// Maximum number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,

    /// Streaming flag, forwarded as given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    /// Client-requested model; selects the upstream endpoint rather than
    /// travelling in the body.
    #[serde(skip)]
    pub model: Option<String>,

    /// Any other fields the client sent, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `input` field of an embeddings request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingsInput {
    /// A single text.
    Single(String),
    /// Several texts, embedded in order.
    Batch(Vec<String>),
}

impl EmbeddingsInput {
    /// Extract the required `input` field from a parsed request body.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if `input` is absent or `null`, and
    /// `InvalidField` if it is neither a string nor an array of strings.
    pub fn from_body(body: &Map<String, Value>) -> Result<Self> {
        match body.get("input") {
            None | Some(Value::Null) => Err(InputError::MissingField("input")),
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(|e| InputError::InvalidField {
                    field: "input",
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Number of texts to embed.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Batch(items) => items.len(),
        }
    }

    /// Whether there is nothing to embed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One embedding vector and its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingItem {
    /// The vector.
    pub embedding: Vec<f64>,
    /// 0-based position of the corresponding input text.
    pub index: usize,
}

/// Embeddings returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsResult {
    /// Vectors in input order.
    pub data: Vec<EmbeddingItem>,
    /// Model that produced them.
    pub model: String,
}

impl EmbeddingsResult {
    /// Build a result from raw vectors, assigning `index` by position.
    #[must_use]
    pub fn from_vectors(vectors: Vec<Vec<f64>>, model: impl Into<String>) -> Self {
        let data = vectors
            .into_iter()
            .enumerate()
            .map(|(index, embedding)| EmbeddingItem { embedding, index })
            .collect();

        Self {
            data,
            model: model.into(),
        }
    }
}
