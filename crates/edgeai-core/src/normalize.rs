//! Chat payload normalization.
//!
//! Clients send chat input in one of several shapes. [`ClientInput`] names the
//! shapes that are recognized and [`normalize_chat_payload`] turns any JSON
//! object into a [`ChatPayload`] with a non-empty message list.

use serde_json::{Map, Value};

use crate::types::{ChatMessage, ChatPayload};

/// Content of the message substituted when a request carries no usable input.
pub const PLACEHOLDER_CONTENT: &str = "Hello";

/// Keys consumed by normalization; they never reach `ChatPayload::extra`.
const INPUT_KEYS: [&str; 4] = ["messages", "prompt", "message", "model"];

/// The recognized shapes of chat input, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientInput {
    /// A non-empty `messages` array, kept element for element.
    Messages(Vec<Value>),
    /// A string under `prompt`.
    Prompt(String),
    /// A string under `message`.
    Message(String),
    /// Nothing usable.
    Empty,
}

impl ClientInput {
    /// Resolve the input shape of a request body.
    ///
    /// A `messages` value only counts when it is a non-empty array; its
    /// elements are not inspected. Otherwise `prompt` and then `message` are
    /// tried.
    #[must_use]
    pub fn resolve(body: &Map<String, Value>) -> Self {
        if let Some(Value::Array(messages)) = body.get("messages") {
            if !messages.is_empty() {
                return Self::Messages(messages.clone());
            }
        }
        if let Some(Value::String(prompt)) = body.get("prompt") {
            return Self::Prompt(prompt.clone());
        }
        if let Some(Value::String(message)) = body.get("message") {
            return Self::Message(message.clone());
        }
        Self::Empty
    }

    /// Convert into the message list, never empty.
    #[must_use]
    pub fn into_messages(self) -> Vec<Value> {
        match self {
            Self::Messages(messages) => messages,
            Self::Prompt(text) | Self::Message(text) => vec![ChatMessage::user(text).into()],
            Self::Empty => vec![ChatMessage::user(PLACEHOLDER_CONTENT).into()],
        }
    }
}

/// Normalize an arbitrary request body into a [`ChatPayload`].
///
/// Generation parameters of the expected type are lifted into their typed
/// fields; everything else except the input keys is carried in `extra`.
#[must_use]
pub fn normalize_chat_payload(body: &Map<String, Value>) -> ChatPayload {
    let messages = ClientInput::resolve(body).into_messages();

    let model = body
        .get("model")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(ToString::to_string);

    let mut extra: Map<String, Value> = body
        .iter()
        .filter(|(key, _)| !INPUT_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let temperature = take_typed(&mut extra, "temperature", Value::as_f64);
    let top_p = take_typed(&mut extra, "top_p", Value::as_f64);
    let max_tokens = take_typed(&mut extra, "max_tokens", Value::as_u64);
    let stream = take_typed(&mut extra, "stream", Value::as_bool);

    ChatPayload {
        messages,
        temperature,
        top_p,
        max_tokens,
        stream,
        model,
        extra,
    }
}

/// Remove `key` from `map` if `convert` accepts its value.
fn take_typed<T>(
    map: &mut Map<String, Value>,
    key: &str,
    convert: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let typed = map.get(key).and_then(convert)?;
    map.remove(key);
    Some(typed)
}
