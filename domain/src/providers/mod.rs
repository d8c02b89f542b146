//! Provider configuration types (provider-neutral, serde-free).
//!
//! These types define the shape of provider settings without depending
//! on any serialization format (TOML, JSON, etc.).

/// Top-level provider configuration.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Anthropic API settings.
    pub anthropic: AnthropicProviderConfig,
    /// OpenAI API settings.
    pub openai: OpenAiProviderConfig,
    /// OpenRouter API settings.
    pub openrouter: OpenRouterProviderConfig,
}

/// Anthropic API provider configuration.
#[derive(Debug, Clone)]
pub struct AnthropicProviderConfig {
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the environment variable).
    pub api_key: Option<String>,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    /// Max tokens per response (default: 8192).
    pub max_tokens: u32,
    /// Anthropic API version header.
    pub api_version: String,
    /// Models that get an extended thinking budget.
    pub thinking_models: Vec<String>,
    /// Thinking budget for `thinking_models` (disabled when `None`).
    pub thinking_budget_tokens: Option<u32>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

impl Default for AnthropicProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 8192,
            api_version: "2023-06-01".to_string(),
            thinking_models: vec!["claude-3-7-sonnet-20250219".to_string()],
            thinking_budget_tokens: Some(54_000),
            timeout_seconds: None,
        }
    }
}

/// OpenAI API provider configuration.
#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the environment variable).
    pub api_key: Option<String>,
    /// Base URL for the OpenAI API.
    pub base_url: String,
    /// Max tokens per response (default: 8192).
    pub max_tokens: u32,
    /// Models that reject the `system` role and a custom temperature.
    pub system_as_user_models: Vec<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

impl Default for OpenAiProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            max_tokens: 8192,
            system_as_user_models: vec!["o1-preview".to_string(), "gpt-4.5-preview".to_string()],
            timeout_seconds: None,
        }
    }
}

/// OpenRouter API provider configuration.
#[derive(Debug, Clone)]
pub struct OpenRouterProviderConfig {
    /// Environment variable name for the API key (default: "OPENROUTER_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the environment variable).
    pub api_key: Option<String>,
    /// Base URL for the OpenRouter API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

impl Default for OpenRouterProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            api_key: None,
            base_url: "https://openrouter.ai".to_string(),
            timeout_seconds: None,
        }
    }
}
