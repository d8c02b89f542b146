//! OpenRouter adapter
//!
//! OpenAI-compatible endpoint at `{base_url}/api/v1/chat/completions`.

use super::ProviderAdapter;
use super::chat_completions::{ChatRequest, ChatResponse, chat_messages};
use super::http::{build_client, endpoint, resolve_api_key, send_json};
use async_trait::async_trait;
use roundtable_application::{CompletionRequest, GatewayError};
use roundtable_domain::{OpenRouterProviderConfig, Provider};
use tracing::debug;

/// Reply text used when OpenRouter answers without content
pub const NO_DATA_RETURNED: &str = "<No data returned>";

pub struct OpenRouterAdapter {
    client: reqwest::Client,
    api_key: String,
    config: OpenRouterProviderConfig,
}

impl OpenRouterAdapter {
    pub fn new(api_key: impl Into<String>, config: OpenRouterProviderConfig) -> Self {
        Self {
            client: build_client(config.timeout_seconds),
            api_key: api_key.into(),
            config,
        }
    }

    /// Build the adapter when an API key can be found.
    pub fn from_config(config: &OpenRouterProviderConfig) -> Option<Self> {
        let api_key = resolve_api_key(config.api_key.as_deref(), &config.api_key_env)?;
        Some(Self::new(api_key, config.clone()))
    }
}

#[async_trait]
impl ProviderAdapter for OpenRouterAdapter {
    fn kind(&self) -> Provider {
        Provider::OpenRouter
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let body = ChatRequest {
            model: request.model.model(),
            messages: chat_messages(request, "system"),
            temperature: Some(request.temperature),
            max_completion_tokens: None,
            store: None,
        };
        debug!(model = body.model, "OpenRouter request with {} messages", body.messages.len());

        let response: ChatResponse = send_json(
            self.client
                .post(endpoint(&self.config.base_url, "api/v1/chat/completions"))
                .bearer_auth(&self.api_key)
                .json(&body),
        )
        .await?;

        Ok(response
            .first_content()
            .unwrap_or_else(|| NO_DATA_RETURNED.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{ModelSpec, PromptMessage};
    use serde_json::{Value, json};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> CompletionRequest {
        CompletionRequest::new(
            ModelSpec::new(Provider::OpenRouter, "deepseek/deepseek-r1").unwrap(),
            "Be brief.",
            vec![PromptMessage::user("Hi"), PromptMessage::assistant("Hello"), PromptMessage::user("More")],
            0.7,
        )
    }

    fn adapter_for(base_url: &str) -> OpenRouterAdapter {
        OpenRouterAdapter::new(
            "or-key",
            OpenRouterProviderConfig {
                base_url: base_url.to_string(),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_complete_sends_system_message_first() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .and(header("authorization", "Bearer or-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Sure"}}]
            })))
            .mount(&server)
            .await;

        let text = adapter_for(&server.uri()).complete(&request()).await.unwrap();
        assert_eq!(text, "Sure");

        let received = server.received_requests().await.unwrap();
        let sent: Value = received[0].body_json().unwrap();
        assert_eq!(sent["model"], "deepseek/deepseek-r1");
        assert_eq!(sent["messages"][0]["role"], "system");
        assert_eq!(sent["messages"].as_array().unwrap().len(), 4);
        assert!(sent.get("store").is_none());
    }

    #[tokio::test]
    async fn test_missing_choices_yield_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let text = adapter_for(&server.uri()).complete(&request()).await.unwrap();
        assert_eq!(text, NO_DATA_RETURNED);
    }

    #[tokio::test]
    async fn test_server_error_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = adapter_for(&server.uri()).complete(&request()).await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::RequestFailed {
                status: 503,
                message: "overloaded".to_string()
            }
        );
    }
}
