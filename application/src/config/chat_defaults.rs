//! Starting point for new sessions.

use crate::use_cases::persist_session::DEFAULT_AUTOSAVE_MIN_MESSAGES;
use roundtable_domain::{ChatMode, ChatSettings, DEFAULT_SYSTEM_PROMPT, RoundTableConfig, Session};

/// Defaults applied to every new session.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatDefaults {
    pub mode: ChatMode,
    pub settings: ChatSettings,
    /// System prompt used when no prompt file is loaded
    pub system: String,
    pub round_table: RoundTableConfig,
    /// Auto-save once history holds more than this many messages
    pub autosave_min_messages: usize,
}

impl Default for ChatDefaults {
    fn default() -> Self {
        Self {
            mode: ChatMode::default(),
            settings: ChatSettings::default(),
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            round_table: RoundTableConfig::default(),
            autosave_min_messages: DEFAULT_AUTOSAVE_MIN_MESSAGES,
        }
    }
}

impl ChatDefaults {
    /// A fresh, empty session carrying these defaults
    pub fn new_session(&self) -> Session {
        let mut session = Session::new(self.system.clone());
        session.mode = self.mode;
        session.settings = self.settings.clone();
        session.round_table = self.round_table.clone();
        session
    }
}
