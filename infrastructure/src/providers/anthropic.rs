//! Anthropic Messages API adapter
//!
//! `POST {base_url}/v1/messages` with `x-api-key` and `anthropic-version`
//! headers. The system prompt travels as the top-level `system` field.

use super::http::{build_client, endpoint, resolve_api_key, send_json};
use super::ProviderAdapter;
use async_trait::async_trait;
use roundtable_application::{CompletionRequest, GatewayError};
use roundtable_domain::{AnthropicProviderConfig, Provider, Role};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Extra output room on top of the thinking budget
const THINKING_OUTPUT_TOKENS: u32 = 10_000;

pub struct AnthropicAdapter {
    client: reqwest::Client,
    api_key: String,
    config: AnthropicProviderConfig,
}

impl AnthropicAdapter {
    pub fn new(api_key: impl Into<String>, config: AnthropicProviderConfig) -> Self {
        Self {
            client: build_client(config.timeout_seconds),
            api_key: api_key.into(),
            config,
        }
    }

    /// Build the adapter when an API key can be found.
    pub fn from_config(config: &AnthropicProviderConfig) -> Option<Self> {
        let api_key = resolve_api_key(config.api_key.as_deref(), &config.api_key_env)?;
        Some(Self::new(api_key, config.clone()))
    }

    fn thinking_budget(&self, model: &str) -> Option<u32> {
        self.config
            .thinking_budget_tokens
            .filter(|_| self.config.thinking_models.iter().any(|m| m == model))
    }

    fn build_body<'a>(&self, request: &'a CompletionRequest) -> MessagesRequest<'a> {
        let model = request.model.model();
        let thinking = self.thinking_budget(model);

        MessagesRequest {
            model,
            max_tokens: match thinking {
                Some(budget) => budget + THINKING_OUTPUT_TOKENS,
                None => self.config.max_tokens,
            },
            system: &request.system_prompt,
            messages: to_wire_messages(request),
            // extended thinking rejects a custom temperature
            temperature: thinking.is_none().then_some(request.temperature),
            thinking: thinking.map(|budget_tokens| ThinkingConfig {
                kind: "enabled",
                budget_tokens,
            }),
        }
    }
}

/// Everything that is not an assistant message is sent as `user`;
/// consecutive same-role messages are merged.
fn to_wire_messages(request: &CompletionRequest) -> Vec<WireMessage<'static>> {
    let mut out: Vec<WireMessage<'static>> = Vec::new();
    for message in &request.messages {
        let role = if message.role == Role::Assistant {
            "assistant"
        } else {
            "user"
        };
        match out.last_mut() {
            Some(last) if last.role == role => {
                last.content.push_str("\n\n");
                last.content.push_str(&message.content);
            }
            _ => out.push(WireMessage {
                role,
                content: message.content.clone(),
            }),
        }
    }
    out
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn kind(&self) -> Provider {
        Provider::Anthropic
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let body = self.build_body(request);
        debug!(
            model = body.model,
            thinking = body.thinking.is_some(),
            "Anthropic request with {} messages",
            body.messages.len()
        );

        let response: MessagesResponse = send_json(
            self.client
                .post(endpoint(&self.config.base_url, "v1/messages"))
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", &self.config.api_version)
                .json(&body),
        )
        .await?;

        Ok(response.text())
    }
}

// ─── Wire types ──────────────────────────────────────────────────

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    messages: Vec<WireMessage<'static>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking: Option<ThinkingConfig>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Serialize)]
struct ThinkingConfig {
    #[serde(rename = "type")]
    kind: &'static str,
    budget_tokens: u32,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
}

impl MessagesResponse {
    /// Text blocks joined by newlines; thinking blocks are dropped.
    fn text(self) -> String {
        self.content
            .into_iter()
            .filter_map(|block| match block {
                ResponseBlock::Text { text } => Some(text),
                ResponseBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ResponseBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{ModelSpec, PromptMessage};
    use serde_json::{Value, json};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(base_url: &str) -> AnthropicProviderConfig {
        AnthropicProviderConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    fn request(model: &str, messages: Vec<PromptMessage>) -> CompletionRequest {
        CompletionRequest::new(
            ModelSpec::new(Provider::Anthropic, model).unwrap(),
            "Be brief.",
            messages,
            0.7,
        )
    }

    #[test]
    fn test_body_plain_model() {
        let adapter = AnthropicAdapter::new("k", AnthropicProviderConfig::default());
        let req = request("claude-3-5-sonnet-20241022", vec![PromptMessage::user("Hi")]);
        let body = serde_json::to_value(adapter.build_body(&req)).unwrap();

        assert_eq!(body["model"], "claude-3-5-sonnet-20241022");
        assert_eq!(body["system"], "Be brief.");
        assert_eq!(body["max_tokens"], 8192);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!(body.get("thinking").is_none());
        assert_eq!(body["messages"][0], json!({"role": "user", "content": "Hi"}));
    }

    #[test]
    fn test_body_thinking_model() {
        let adapter = AnthropicAdapter::new("k", AnthropicProviderConfig::default());
        let req = request("claude-3-7-sonnet-20250219", vec![PromptMessage::user("Hi")]);
        let body = serde_json::to_value(adapter.build_body(&req)).unwrap();

        assert_eq!(body["thinking"]["type"], "enabled");
        assert_eq!(body["thinking"]["budget_tokens"], 54_000);
        assert_eq!(body["max_tokens"], 64_000);
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_non_assistant_roles_merge_into_user() {
        let req = request(
            "claude-3-5-haiku-20241022",
            vec![
                PromptMessage {
                    role: Role::System,
                    content: "note".to_string(),
                },
                PromptMessage::user("Hi"),
                PromptMessage::assistant("Hello"),
            ],
        );
        let wire = to_wire_messages(&req);
        assert_eq!(wire.len(), 2);
        assert_eq!(wire[0].role, "user");
        assert_eq!(wire[0].content, "note\n\nHi");
        assert_eq!(wire[1].role, "assistant");
    }

    #[tokio::test]
    async fn test_complete_joins_text_blocks_and_drops_thinking() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "content": [
                    {"type": "thinking", "thinking": "hmm", "signature": "x"},
                    {"type": "text", "text": "First"},
                    {"type": "text", "text": "Second"}
                ]
            })))
            .mount(&server)
            .await;

        let adapter = AnthropicAdapter::new("sk-test", config_for(&server.uri()));
        let text = adapter
            .complete(&request(
                "claude-3-7-sonnet-20250219",
                vec![PromptMessage::user("Hi")],
            ))
            .await
            .unwrap();

        assert_eq!(text, "First\nSecond");

        let received = server.received_requests().await.unwrap();
        let sent: Value = received[0].body_json().unwrap();
        assert_eq!(sent["system"], "Be brief.");
    }

    #[tokio::test]
    async fn test_complete_maps_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .mount(&server)
            .await;

        let adapter = AnthropicAdapter::new("bad", config_for(&server.uri()));
        let err = adapter
            .complete(&request(
                "claude-3-5-haiku-20241022",
                vec![PromptMessage::user("Hi")],
            ))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GatewayError::Authentication("invalid x-api-key".to_string())
        );
    }

    #[tokio::test]
    async fn test_complete_rejects_unparseable_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let adapter = AnthropicAdapter::new("k", config_for(&server.uri()));
        let err = adapter
            .complete(&request(
                "claude-3-5-haiku-20241022",
                vec![PromptMessage::user("Hi")],
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }
}
