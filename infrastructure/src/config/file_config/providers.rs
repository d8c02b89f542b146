//! Provider configuration from TOML (`[providers]` section)

use roundtable_domain::{
    AnthropicProviderConfig, OpenAiProviderConfig, OpenRouterProviderConfig, ProviderConfig,
};
use serde::{Deserialize, Serialize};

/// Anthropic API provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the environment variable).
    pub api_key: Option<String>,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    /// Default max tokens per response.
    pub max_tokens: u32,
    /// Anthropic API version header.
    pub api_version: String,
    /// Models that use extended thinking.
    pub thinking_models: Vec<String>,
    /// Thinking budget for `thinking_models`; unset disables thinking.
    pub thinking_budget_tokens: Option<u32>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        let defaults = AnthropicProviderConfig::default();
        Self {
            api_key_env: defaults.api_key_env,
            api_key: None,
            base_url: defaults.base_url,
            max_tokens: defaults.max_tokens,
            api_version: defaults.api_version,
            thinking_models: defaults.thinking_models,
            thinking_budget_tokens: defaults.thinking_budget_tokens,
            timeout_seconds: None,
        }
    }
}

/// OpenAI API provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the environment variable).
    pub api_key: Option<String>,
    /// Base URL for the OpenAI API.
    pub base_url: String,
    /// Default max tokens per response.
    pub max_tokens: u32,
    /// Models that get the system prompt as a user message and no temperature.
    pub system_as_user_models: Vec<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        let defaults = OpenAiProviderConfig::default();
        Self {
            api_key_env: defaults.api_key_env,
            api_key: None,
            base_url: defaults.base_url,
            max_tokens: defaults.max_tokens,
            system_as_user_models: defaults.system_as_user_models,
            timeout_seconds: None,
        }
    }
}

/// OpenRouter API provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenRouterConfig {
    /// Environment variable name for the API key (default: "OPENROUTER_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the environment variable).
    pub api_key: Option<String>,
    /// Base URL for the OpenRouter API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

impl Default for FileOpenRouterConfig {
    fn default() -> Self {
        let defaults = OpenRouterProviderConfig::default();
        Self {
            api_key_env: defaults.api_key_env,
            api_key: None,
            base_url: defaults.base_url,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Anthropic API settings.
    pub anthropic: FileAnthropicConfig,
    /// OpenAI API settings.
    pub openai: FileOpenAiConfig,
    /// OpenRouter API settings.
    pub openrouter: FileOpenRouterConfig,
}

impl FileProvidersConfig {
    /// Convert to the serde-free domain representation
    pub fn to_provider_config(&self) -> ProviderConfig {
        let anthropic = &self.anthropic;
        let openai = &self.openai;
        let openrouter = &self.openrouter;

        ProviderConfig {
            anthropic: AnthropicProviderConfig {
                api_key_env: anthropic.api_key_env.clone(),
                api_key: anthropic.api_key.clone(),
                base_url: anthropic.base_url.clone(),
                max_tokens: anthropic.max_tokens,
                api_version: anthropic.api_version.clone(),
                thinking_models: anthropic.thinking_models.clone(),
                thinking_budget_tokens: anthropic.thinking_budget_tokens,
                timeout_seconds: anthropic.timeout_seconds,
            },
            openai: OpenAiProviderConfig {
                api_key_env: openai.api_key_env.clone(),
                api_key: openai.api_key.clone(),
                base_url: openai.base_url.clone(),
                max_tokens: openai.max_tokens,
                system_as_user_models: openai.system_as_user_models.clone(),
                timeout_seconds: openai.timeout_seconds,
            },
            openrouter: OpenRouterProviderConfig {
                api_key_env: openrouter.api_key_env.clone(),
                api_key: openrouter.api_key.clone(),
                base_url: openrouter.base_url.clone(),
                timeout_seconds: openrouter.timeout_seconds,
            },
        }
    }

    /// Timeouts of all providers, for validation
    pub(super) fn timeouts(&self) -> [(&'static str, Option<u64>); 3] {
        [
            ("providers.anthropic", self.anthropic.timeout_seconds),
            ("providers.openai", self.openai.timeout_seconds),
            ("providers.openrouter", self.openrouter.timeout_seconds),
        ]
    }
}
