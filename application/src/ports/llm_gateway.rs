//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers.

use async_trait::async_trait;
use roundtable_domain::{ModelSpec, PromptMessage, Provider};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(Provider),
}

impl GatewayError {
    /// Short category label used in logs and run reports.
    pub fn category(&self) -> &'static str {
        match self {
            GatewayError::Network(_) => "network",
            GatewayError::Authentication(_) => "authentication",
            GatewayError::RateLimited(_) => "rate_limited",
            GatewayError::RequestFailed { .. } => "request_failed",
            GatewayError::InvalidResponse(_) => "invalid_response",
            GatewayError::ProviderNotConfigured(_) => "not_configured",
        }
    }
}

/// A single, stateless completion request.
///
/// `messages` must be non-empty, start with a user message and alternate
/// roles. Builders in [`roundtable_domain::session::transcript`] produce
/// views with that shape.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: ModelSpec,
    pub system_prompt: String,
    pub messages: Vec<PromptMessage>,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(
        model: ModelSpec,
        system_prompt: impl Into<String>,
        messages: Vec<PromptMessage>,
        temperature: f32,
    ) -> Self {
        Self {
            model,
            system_prompt: system_prompt.into(),
            messages,
            temperature,
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer. Each call is
/// independent: the gateway never keeps conversation state between calls.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one request and return the assistant text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;

    /// Whether a provider has credentials and can be called.
    fn is_available(&self, provider: Provider) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GatewayError::RequestFailed {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (500): boom");

        let err = GatewayError::ProviderNotConfigured(Provider::OpenRouter);
        assert_eq!(err.to_string(), "Provider not configured: OpenRouter");
    }

    #[test]
    fn test_error_category() {
        assert_eq!(GatewayError::Network("x".into()).category(), "network");
        assert_eq!(
            GatewayError::RateLimited("slow down".into()).category(),
            "rate_limited"
        );
    }
}
