//! Request body extraction.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// A JSON object body that falls back to `{}`.
///
/// Bodies that are empty, not JSON, or JSON but not an object all become an
/// empty object, so handlers never fail on body parsing. A body over the
/// configured limit is rejected with `PayloadTooLarge`.
#[derive(Debug, Clone, Default)]
pub struct LenientJson(pub Map<String, Value>);

impl LenientJson {
    /// Parse raw bytes, falling back to an empty object.
    #[must_use]
    pub fn parse(bytes: &[u8]) -> Self {
        match serde_json::from_slice(bytes) {
            Ok(Value::Object(map)) => Self(map),
            _ => Self::default(),
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for LenientJson
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge
            } else {
                ApiError::BadRequest(rejection.body_text())
            }
        })?;
        Ok(Self::parse(&bytes))
    }
}
