//! Round table setup from TOML (`[round_table]` section)
//!
//! ```toml
//! [round_table]
//! chairman = "anthropic:claude-3-7-sonnet-20250219"
//! participants = [
//!   { name = "Claude", model = "anthropic:claude-3-5-sonnet-20241022" },
//!   { name = "R1", model = "openrouter:deepseek/deepseek-r1", temperature = 0.6 },
//! ]
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoundTableConfig {
    pub participants: Vec<FileParticipantConfig>,
    /// Chairman model as `provider:model`
    pub chairman: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileParticipantConfig {
    pub name: String,
    /// `provider:model`
    pub model: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
}
