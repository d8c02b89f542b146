//! Model catalogs from TOML (`[models]` section)

use roundtable_domain::Provider;
use serde::{Deserialize, Serialize};

/// Models offered per provider; an empty list means the built-in catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub anthropic: Vec<String>,
    pub openai: Vec<String>,
    pub openrouter: Vec<String>,
}

impl FileModelsConfig {
    pub fn catalog(&self, provider: Provider) -> Vec<String> {
        let configured = match provider {
            Provider::Anthropic => &self.anthropic,
            Provider::OpenAi => &self.openai,
            Provider::OpenRouter => &self.openrouter,
        };
        if configured.is_empty() {
            provider
                .default_models()
                .iter()
                .map(|m| m.to_string())
                .collect()
        } else {
            configured.clone()
        }
    }
}
