//! Chat defaults from TOML (`[chat]` section)

use roundtable_domain::{ChatMode, DEFAULT_TEMPERATURE, ModelSpec, Provider};
use serde::{Deserialize, Serialize};

/// `[chat.default_model]`: provider plus an optional model id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelSelection {
    pub provider: Provider,
    /// Falls back to the provider's first catalog entry
    pub model: Option<String>,
}

impl FileModelSelection {
    pub fn to_model_spec(&self) -> Result<ModelSpec, String> {
        match &self.model {
            Some(model) => ModelSpec::new(self.provider, model.clone()).map_err(|e| e.to_string()),
            None => Ok(ModelSpec::default_for(self.provider)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Mode of new sessions
    pub mode: ChatMode,
    /// Sampling temperature, `0.0..=2.0`
    pub temperature: f32,
    /// Round table rounds per user message
    pub rounds: u32,
    /// Auto-save once history holds more than this many messages
    pub autosave_min_messages: usize,
    /// System prompt used when no prompt file is loaded
    pub system: Option<String>,
    pub default_model: FileModelSelection,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            mode: ChatMode::Standard,
            temperature: DEFAULT_TEMPERATURE,
            rounds: 1,
            autosave_min_messages: 4,
            system: None,
            default_model: FileModelSelection::default(),
        }
    }
}
