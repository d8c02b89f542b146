//! Infrastructure layer for roundtable
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use logging::JsonlConversationLogger;
pub use providers::{
    ProviderAdapter, anthropic::AnthropicAdapter, openai::OpenAiAdapter,
    openrouter::OpenRouterAdapter, routing::RoutingGateway,
};
pub use storage::{FilePromptStore, JsonSessionStore};
