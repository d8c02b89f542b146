use super::ProviderAdapter;
use super::anthropic::AnthropicAdapter;
use super::openai::OpenAiAdapter;
use super::openrouter::OpenRouterAdapter;
use async_trait::async_trait;
use roundtable_application::{CompletionRequest, GatewayError, LlmGateway};
use roundtable_domain::{Provider, ProviderConfig};
use std::sync::Arc;
use tracing::{debug, info};

/// Gateway that dispatches each request to the adapter of its provider.
///
/// Providers without credentials have no adapter; requests for them fail
/// with [`GatewayError::ProviderNotConfigured`].
pub struct RoutingGateway {
    providers: Vec<Arc<dyn ProviderAdapter>>,
}

impl RoutingGateway {
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        Self { providers }
    }

    /// Build one adapter per provider whose API key can be resolved.
    pub fn from_config(config: &ProviderConfig) -> Self {
        let mut providers: Vec<Arc<dyn ProviderAdapter>> = Vec::new();

        if let Some(adapter) = AnthropicAdapter::from_config(&config.anthropic) {
            providers.push(Arc::new(adapter));
        }
        if let Some(adapter) = OpenAiAdapter::from_config(&config.openai) {
            providers.push(Arc::new(adapter));
        }
        if let Some(adapter) = OpenRouterAdapter::from_config(&config.openrouter) {
            providers.push(Arc::new(adapter));
        }

        let gateway = Self::new(providers);
        info!(
            "Providers available: {}",
            gateway
                .available()
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        gateway
    }

    /// Providers that have an adapter, in declaration order
    pub fn available(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.is_available(*p))
            .collect()
    }

    /// Providers without credentials
    pub fn missing(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|p| !self.is_available(*p))
            .collect()
    }

    fn resolve_provider(&self, provider: Provider) -> Result<&dyn ProviderAdapter, GatewayError> {
        self.providers
            .iter()
            .find(|p| p.kind() == provider)
            .map(|p| p.as_ref())
            .ok_or(GatewayError::ProviderNotConfigured(provider))
    }
}

#[async_trait]
impl LlmGateway for RoutingGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let provider = request.model.provider();
        debug!("Routing {} to {}", request.model, provider);
        self.resolve_provider(provider)?.complete(request).await
    }

    fn is_available(&self, provider: Provider) -> bool {
        self.providers.iter().any(|p| p.kind() == provider)
    }
}
