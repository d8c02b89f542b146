//! Provider value object - the closed set of hosted LLM APIs

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Hosted LLM provider (Value Object)
///
/// Every participant and every standard-mode request targets exactly one
/// provider. The set is closed: adding a provider means adding an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Anthropic,
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "openrouter")]
    OpenRouter,
}

impl Provider {
    /// All providers, in display order
    pub const ALL: [Provider; 3] = [Provider::Anthropic, Provider::OpenAi, Provider::OpenRouter];

    /// Machine identifier (used in `provider:model` specs and config keys)
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::OpenAi => "openai",
            Provider::OpenRouter => "openrouter",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Anthropic => "Anthropic",
            Provider::OpenAi => "OpenAI",
            Provider::OpenRouter => "OpenRouter",
        }
    }

    /// Built-in model catalog for this provider.
    ///
    /// The first entry is the provider's default model.
    pub fn default_models(&self) -> &'static [&'static str] {
        match self {
            Provider::Anthropic => &[
                "claude-3-7-sonnet-20250219",
                "claude-3-5-sonnet-20241022",
                "claude-3-opus-20240229",
            ],
            Provider::OpenAi => &["gpt-4o", "o1-preview", "gpt-4.5-preview"],
            Provider::OpenRouter => &["deepseek/deepseek-r1"],
        }
    }

    /// Default model identifier for this provider
    pub fn default_model(&self) -> &'static str {
        self.default_models()[0]
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::Anthropic
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Provider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Provider::Anthropic),
            "openai" | "open_ai" | "open-ai" => Ok(Provider::OpenAi),
            "openrouter" | "open_router" | "open-router" => Ok(Provider::OpenRouter),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Anthropic".parse::<Provider>().unwrap(), Provider::Anthropic);
        assert_eq!("OPENAI".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!("open-router".parse::<Provider>().unwrap(), Provider::OpenRouter);
    }

    #[test]
    fn test_parse_unknown_provider() {
        let err = "mistral".parse::<Provider>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownProvider(ref p) if p == "mistral"));
    }

    #[test]
    fn test_serde_uses_machine_identifier() {
        assert_eq!(
            serde_json::to_string(&Provider::OpenRouter).unwrap(),
            "\"openrouter\""
        );
        let p: Provider = serde_json::from_str("\"openai\"").unwrap();
        assert_eq!(p, Provider::OpenAi);
    }

    #[test]
    fn test_every_provider_has_a_default_model() {
        for provider in Provider::ALL {
            assert!(!provider.default_model().is_empty());
        }
        assert_eq!(Provider::OpenRouter.default_model(), "deepseek/deepseek-r1");
    }
}
