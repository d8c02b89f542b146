//! File locations from TOML (`[paths]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePathsConfig {
    /// Directory holding saved sessions
    pub sessions_dir: String,
    /// Directory holding prompt files
    pub prompts_dir: String,
    /// Prompt loaded at startup when present
    pub default_prompt: Option<String>,
}

impl Default for FilePathsConfig {
    fn default() -> Self {
        Self {
            sessions_dir: "roundtable_sessions".to_string(),
            prompts_dir: "roundtable_prompts".to_string(),
            default_prompt: Some("code_guru.json".to_string()),
        }
    }
}
