//! Provider adapters
//!
//! One adapter per hosted provider, all behind [`ProviderAdapter`]. The
//! [`routing::RoutingGateway`] picks the adapter for each request.

pub mod anthropic;
pub(crate) mod chat_completions;
pub(crate) mod http;
pub mod openai;
pub mod openrouter;
pub mod routing;

use async_trait::async_trait;
use roundtable_application::{CompletionRequest, GatewayError};
use roundtable_domain::Provider;

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> Provider;

    /// Translate the request to the provider's wire shape and return the reply text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}
