//! HTTP provider for the Workers AI REST API.
//!
//! Both operations POST to `{base_url}/{account_id}/ai/run/{model}` with a
//! bearer credential. Successful responses carry a `result` object; failures
//! carry an `errors` array of `{message}` objects.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use edgeai_core::{EmbeddingsInput, EmbeddingsResult};

use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use crate::{ChatRequest, Provider};

/// Provider backed by the Workers AI REST API.
#[derive(Debug, Clone)]
pub struct WorkersAiProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

/// Successful embeddings response body.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    result: Option<EmbeddingsData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsData {
    #[serde(default)]
    data: Vec<Vec<f64>>,
}

impl WorkersAiProvider {
    /// Create a new provider with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// URL of the run endpoint for `model`.
    ///
    /// Each `/`-separated part of the model name becomes one percent-encoded
    /// path segment, so the URL always stays under the account's run path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidModel` if the model name has an empty, `.` or `..`
    /// segment, and `Request` if the base URL is unusable.
    pub fn run_url(&self, model: &str) -> Result<Url> {
        let segments: Vec<&str> = model.split('/').collect();
        if segments.iter().any(|s| s.is_empty() || *s == "." || *s == "..") {
            return Err(ProviderError::InvalidModel(model.to_string()));
        }

        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| ProviderError::Request(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ProviderError::Request("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(&self.config.account_id)
            .extend(["ai", "run"])
            .extend(segments);
        Ok(url)
    }

    async fn post<T: serde::Serialize + ?Sized>(
        &self,
        model: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        self.client
            .post(self.run_url(model)?)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))
    }
}

/// Parse an upstream body, keeping unparseable text under `raw`.
fn parse_body(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or_else(|_| json!({ "raw": text }))
}

/// First upstream error message, if the body has the expected shape.
fn first_error_message(body: &Value) -> Option<&str> {
    body.pointer("/errors/0/message").and_then(Value::as_str)
}

#[async_trait]
impl Provider for WorkersAiProvider {
    fn id(&self) -> &str {
        "cloudflare-workers-ai"
    }

    async fn chat(&self, request: ChatRequest<'_>) -> Result<Value> {
        let default_model = self
            .config
            .chat_model
            .as_deref()
            .ok_or(ProviderError::NotConfigured("AI_MODEL_CHAT_PRIMARY"))?;
        let model = request.payload.model.as_deref().unwrap_or(default_model);

        let response = self.post(model, &request.payload).await?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        let body = parse_body(text);

        if !status.is_success() {
            let message = first_error_message(&body).map_or_else(
                || format!("Upstream error {}", status.as_u16()),
                ToString::to_string,
            );

            tracing::error!(
                request_id = %request.request_id,
                model = %model,
                status = %status,
                error = %message,
                "Upstream chat request failed"
            );

            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let mut envelope = Map::new();
        envelope.insert("model".into(), Value::String(model.to_string()));
        match body {
            Value::Object(fields) => envelope.extend(fields),
            other => {
                envelope.insert("raw".into(), other);
            }
        }
        envelope.insert("provider".into(), Value::String(self.id().to_string()));
        envelope.insert(
            "requestId".into(),
            Value::String(request.request_id.to_string()),
        );

        tracing::debug!(request_id = %request.request_id, model = %model, "Chat completed");
        Ok(Value::Object(envelope))
    }

    async fn embeddings(&self, input: EmbeddingsInput) -> Result<EmbeddingsResult> {
        let model = self
            .config
            .embeddings_model
            .as_deref()
            .ok_or(ProviderError::NotConfigured("AI_MODEL_EMBEDDINGS_PRIMARY"))?;

        let response = self.post(model, &json!({ "input": &input })).await?;
        let status = response.status();

        if !status.is_success() {
            tracing::error!(model = %model, status = %status, "Upstream embeddings request failed");
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message: "Upstream request failed".to_string(),
            });
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        let vectors = parsed.result.map(|r| r.data).unwrap_or_default();

        if vectors.len() != input.len() {
            return Err(ProviderError::InvalidResponse(format!(
                "expected {} embeddings, upstream returned {}",
                input.len(),
                vectors.len()
            )));
        }

        Ok(EmbeddingsResult::from_vectors(vectors, model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeai_core::{normalize_chat_payload, RequestId};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::ProviderKind;

    fn config(base_url: &str) -> ProviderConfig {
        ProviderConfig {
            kind: ProviderKind::WorkersAi,
            account_id: "acct".into(),
            api_key: "upstream-key".into(),
            chat_model: Some("chat-model".into()),
            embeddings_model: Some("embed-model".into()),
            base_url: base_url.into(),
            timeout_seconds: 5,
        }
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    async fn chat(provider: &WorkersAiProvider, body: &Map<String, Value>) -> Result<Value> {
        provider
            .chat(ChatRequest {
                payload: normalize_chat_payload(body),
                raw_body: body,
                request_id: RequestId::generate(),
            })
            .await
    }

    #[test]
    fn run_url_trims_trailing_slash() {
        let provider = WorkersAiProvider::new(config("http://upstream/")).unwrap();
        assert_eq!(
            provider.run_url("m").unwrap().as_str(),
            "http://upstream/acct/ai/run/m"
        );
    }

    #[test]
    fn run_url_keeps_model_namespaces() {
        let provider = WorkersAiProvider::new(config("http://upstream/client/v4/accounts")).unwrap();
        assert_eq!(
            provider.run_url("@cf/meta/llama-3-8b").unwrap().as_str(),
            "http://upstream/client/v4/accounts/acct/ai/run/@cf/meta/llama-3-8b"
        );
    }

    #[test]
    fn run_url_encodes_query_and_fragment() {
        let provider = WorkersAiProvider::new(config("http://upstream")).unwrap();
        let url = provider.run_url("m?x=1#frag").unwrap();
        assert_eq!(url.path(), "/acct/ai/run/m%3Fx=1%23frag");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn run_url_rejects_dot_segments() {
        let provider = WorkersAiProvider::new(config("http://upstream")).unwrap();
        for model in ["../../user/tokens", "a/./b", "a//b", ""] {
            assert!(
                matches!(provider.run_url(model), Err(ProviderError::InvalidModel(_))),
                "{model:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn chat_never_sends_traversing_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let provider = WorkersAiProvider::new(config(&server.uri())).unwrap();
        let err = chat(&provider, &object(json!({ "model": "../../../user/tokens" })))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidModel(_)));
    }

    #[tokio::test]
    async fn chat_sends_normalized_payload_with_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/acct/ai/run/chat-model"))
            .and(header("authorization", "Bearer upstream-key"))
            .and(body_json(json!({
                "messages": [{ "role": "user", "content": "X" }]
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "result": { "response": "hi" }, "success": true })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let provider = WorkersAiProvider::new(config(&server.uri())).unwrap();
        let envelope = chat(&provider, &object(json!({ "prompt": "X" }))).await.unwrap();

        assert_eq!(envelope["model"], "chat-model");
        assert_eq!(envelope["result"]["response"], "hi");
        assert_eq!(envelope["success"], true);
        assert_eq!(envelope["provider"], "cloudflare-workers-ai");
        assert!(envelope["requestId"].is_string());
    }

    #[tokio::test]
    async fn chat_model_override_selects_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/acct/ai/run/other-model"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": {} })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = WorkersAiProvider::new(config(&server.uri())).unwrap();
        let envelope = chat(&provider, &object(json!({ "model": "other-model" })))
            .await
            .unwrap();
        assert_eq!(envelope["model"], "other-model");
    }

    #[tokio::test]
    async fn chat_requires_configured_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut cfg = config(&server.uri());
        cfg.chat_model = None;
        let provider = WorkersAiProvider::new(cfg).unwrap();

        let err = chat(&provider, &object(json!({ "model": "x" }))).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn chat_surfaces_upstream_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [{ "message": "bad input" }, { "message": "second" }],
                "success": false
            })))
            .mount(&server)
            .await;

        let provider = WorkersAiProvider::new(config(&server.uri())).unwrap();
        let err = chat(&provider, &Map::new()).await.unwrap_err();
        match err {
            ProviderError::Upstream { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad input");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn chat_generic_message_for_unrecognized_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let provider = WorkersAiProvider::new(config(&server.uri())).unwrap();
        let err = chat(&provider, &Map::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Upstream error 503");
    }

    #[tokio::test]
    async fn chat_keeps_unparseable_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
            .mount(&server)
            .await;

        let provider = WorkersAiProvider::new(config(&server.uri())).unwrap();
        let envelope = chat(&provider, &Map::new()).await.unwrap();
        assert_eq!(envelope["raw"], "plain text");
        assert_eq!(envelope["model"], "chat-model");
    }

    #[tokio::test]
    async fn embeddings_index_by_position() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/acct/ai/run/embed-model"))
            .and(header("authorization", "Bearer upstream-key"))
            .and(body_json(json!({ "input": ["a", "b"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": { "shape": [2, 2], "data": [[0.1, 0.2], [0.3, 0.4]] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = WorkersAiProvider::new(config(&server.uri())).unwrap();
        let result = provider
            .embeddings(EmbeddingsInput::Batch(vec!["a".into(), "b".into()]))
            .await
            .unwrap();

        assert_eq!(result.model, "embed-model");
        assert_eq!(result.data.len(), 2);
        assert_eq!(result.data[0].embedding, vec![0.1, 0.2]);
        assert_eq!(result.data[1].index, 1);
    }

    #[tokio::test]
    async fn embeddings_hide_upstream_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({ "errors": [{ "message": "secret detail" }] })),
            )
            .mount(&server)
            .await;

        let provider = WorkersAiProvider::new(config(&server.uri())).unwrap();
        let err = provider
            .embeddings(EmbeddingsInput::Single("hi".into()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Upstream request failed");
    }

    #[tokio::test]
    async fn embeddings_count_mismatch_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": {} })))
            .mount(&server)
            .await;

        let provider = WorkersAiProvider::new(config(&server.uri())).unwrap();
        let err = provider
            .embeddings(EmbeddingsInput::Single("hi".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn embeddings_require_configured_model() {
        let mut cfg = config("http://127.0.0.1:9");
        cfg.embeddings_model = None;
        let provider = WorkersAiProvider::new(cfg).unwrap();

        let err = provider
            .embeddings(EmbeddingsInput::Single("hi".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
