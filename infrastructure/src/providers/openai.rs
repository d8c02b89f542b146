//! OpenAI Chat Completions adapter
//!
//! `POST {base_url}/v1/chat/completions` with bearer auth and `store: false`.

use super::ProviderAdapter;
use super::chat_completions::{ChatRequest, ChatResponse, chat_messages};
use super::http::{build_client, endpoint, resolve_api_key, send_json};
use async_trait::async_trait;
use roundtable_application::{CompletionRequest, GatewayError};
use roundtable_domain::{OpenAiProviderConfig, Provider};
use tracing::debug;

pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_key: String,
    config: OpenAiProviderConfig,
}

impl OpenAiAdapter {
    pub fn new(api_key: impl Into<String>, config: OpenAiProviderConfig) -> Self {
        Self {
            client: build_client(config.timeout_seconds),
            api_key: api_key.into(),
            config,
        }
    }

    /// Build the adapter when an API key can be found.
    pub fn from_config(config: &OpenAiProviderConfig) -> Option<Self> {
        let api_key = resolve_api_key(config.api_key.as_deref(), &config.api_key_env)?;
        Some(Self::new(api_key, config.clone()))
    }

    /// Models that take the system prompt as a user message and no temperature
    fn system_as_user(&self, model: &str) -> bool {
        self.config
            .system_as_user_models
            .iter()
            .any(|m| m == model)
    }

    fn build_body<'a>(&self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        let model = request.model.model();
        let restricted = self.system_as_user(model);

        ChatRequest {
            model,
            messages: chat_messages(request, if restricted { "user" } else { "system" }),
            temperature: (!restricted).then_some(request.temperature),
            max_completion_tokens: Some(self.config.max_tokens),
            store: Some(false),
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn kind(&self) -> Provider {
        Provider::OpenAi
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let body = self.build_body(request);
        debug!(model = body.model, "OpenAI request with {} messages", body.messages.len());

        let response: ChatResponse = send_json(
            self.client
                .post(endpoint(&self.config.base_url, "v1/chat/completions"))
                .bearer_auth(&self.api_key)
                .json(&body),
        )
        .await?;

        Ok(response.first_content().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{ModelSpec, PromptMessage};
    use serde_json::{Value, json};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(model: &str) -> CompletionRequest {
        CompletionRequest::new(
            ModelSpec::new(Provider::OpenAi, model).unwrap(),
            "Be brief.",
            vec![PromptMessage::user("Hi")],
            0.5,
        )
    }

    fn adapter_for(base_url: &str) -> OpenAiAdapter {
        OpenAiAdapter::new(
            "sk-test",
            OpenAiProviderConfig {
                base_url: base_url.to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_body_regular_model() {
        let adapter = OpenAiAdapter::new("k", OpenAiProviderConfig::default());
        let req = request("gpt-4o");
        let body = serde_json::to_value(adapter.build_body(&req)).unwrap();

        assert_eq!(body["messages"][0], json!({"role": "system", "content": "Be brief."}));
        assert_eq!(body["messages"][1], json!({"role": "user", "content": "Hi"}));
        assert_eq!(body["store"], false);
        assert!(body.get("temperature").is_some());
    }

    #[test]
    fn test_body_system_as_user_model() {
        let adapter = OpenAiAdapter::new("k", OpenAiProviderConfig::default());
        let req = request("o1-preview");
        let body = serde_json::to_value(adapter.build_body(&req)).unwrap();

        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Be brief.");
        assert!(body.get("temperature").is_none());
        assert_eq!(body["store"], false);
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hello"}}]
            })))
            .mount(&server)
            .await;

        let text = adapter_for(&server.uri())
            .complete(&request("gpt-4o"))
            .await
            .unwrap();
        assert_eq!(text, "Hello");

        let received = server.received_requests().await.unwrap();
        let sent: Value = received[0].body_json().unwrap();
        assert_eq!(sent["model"], "gpt-4o");
    }

    #[tokio::test]
    async fn test_missing_content_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let text = adapter_for(&server.uri())
            .complete(&request("gpt-4o"))
            .await
            .unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_rate_limit_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "Rate limit reached", "type": "requests"}
            })))
            .mount(&server)
            .await;

        let err = adapter_for(&server.uri())
            .complete(&request("gpt-4o"))
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::RateLimited("Rate limit reached".to_string()));
    }
}
