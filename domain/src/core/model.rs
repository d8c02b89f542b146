//! Model selection value object: a provider plus a model identifier

use crate::core::error::DomainError;
use crate::core::provider::Provider;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A concrete model on a concrete provider (Value Object)
///
/// Textual form is `provider:model`, e.g. `anthropic:claude-3-5-sonnet-20241022`
/// or `openrouter:deepseek/deepseek-r1`. Only the first `:` separates the two
/// parts, so model identifiers may themselves contain `/` or `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelSpec {
    provider: Provider,
    model: String,
}

impl ModelSpec {
    /// Create a model spec, rejecting empty model identifiers
    pub fn new(provider: Provider, model: impl Into<String>) -> Result<Self, DomainError> {
        let model = model.into();
        let model = model.trim();
        if model.is_empty() {
            return Err(DomainError::InvalidModelSpec(format!(
                "empty model for provider {}",
                provider.as_str()
            )));
        }
        Ok(Self {
            provider,
            model: model.to_string(),
        })
    }

    /// The provider's default model
    pub fn default_for(provider: Provider) -> Self {
        Self {
            provider,
            model: provider.default_model().to_string(),
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self::default_for(Provider::default())
    }
}

impl std::fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.provider.as_str(), self.model)
    }
}

impl std::str::FromStr for ModelSpec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (provider, model) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| DomainError::InvalidModelSpec(s.to_string()))?;
        ModelSpec::new(provider.parse()?, model)
    }
}

impl Serialize for ModelSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ModelSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let spec: ModelSpec = "anthropic:claude-3-opus-20240229".parse().unwrap();
        assert_eq!(spec.provider(), Provider::Anthropic);
        assert_eq!(spec.model(), "claude-3-opus-20240229");
        assert_eq!(spec.to_string(), "anthropic:claude-3-opus-20240229");
    }

    #[test]
    fn test_model_may_contain_separators() {
        let spec: ModelSpec = "openrouter:deepseek/deepseek-r1:free".parse().unwrap();
        assert_eq!(spec.provider(), Provider::OpenRouter);
        assert_eq!(spec.model(), "deepseek/deepseek-r1:free");
    }

    #[test]
    fn test_missing_separator_is_rejected() {
        assert!(matches!(
            "gpt-4o".parse::<ModelSpec>(),
            Err(DomainError::InvalidModelSpec(_))
        ));
    }

    #[test]
    fn test_empty_model_is_rejected() {
        assert!("openai:  ".parse::<ModelSpec>().is_err());
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        assert!(matches!(
            "cohere:command-r".parse::<ModelSpec>(),
            Err(DomainError::UnknownProvider(_))
        ));
    }

    #[test]
    fn test_serializes_as_string() {
        let spec = ModelSpec::default_for(Provider::OpenAi);
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, "\"openai:gpt-4o\"");
        let back: ModelSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
