//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod chat;
mod logging;
mod models;
mod output;
mod paths;
mod providers;
mod repl;
mod round_table;

pub use chat::{FileChatConfig, FileModelSelection};
pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use output::FileOutputConfig;
pub use paths::FilePathsConfig;
pub use providers::{
    FileAnthropicConfig, FileOpenAiConfig, FileOpenRouterConfig, FileProvidersConfig,
};
pub use repl::FileReplConfig;
pub use round_table::{FileParticipantConfig, FileRoundTableConfig};

use roundtable_application::ChatDefaults;
use roundtable_domain::{
    ChatSettings, DEFAULT_SYSTEM_PROMPT, DomainError, ModelSpec, Participant, RoundTableConfig,
    validate_temperature,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("{field}: temperature {value} is outside 0.0..=2.0")]
    InvalidTemperature { field: String, value: f32 },

    #[error("chat.rounds must be at least 1")]
    InvalidRounds,

    #[error("{0}: timeout_seconds cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("{field}: invalid model {value:?}: {reason}")]
    InvalidModel {
        field: String,
        value: String,
        reason: String,
    },

    #[error("round_table.participants: {0}")]
    InvalidParticipant(DomainError),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Session defaults
    pub chat: FileChatConfig,
    /// Participants and chairman
    pub round_table: FileRoundTableConfig,
    /// Session and prompt directories
    pub paths: FilePathsConfig,
    /// Provider credentials and endpoints
    pub providers: FileProvidersConfig,
    /// Model catalogs shown by `/models`
    pub models: FileModelsConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Tracing file and conversation log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        check_temperature("chat.temperature", self.chat.temperature)?;

        if self.chat.rounds == 0 {
            return Err(ConfigValidationError::InvalidRounds);
        }

        for (section, timeout) in self.providers.timeouts() {
            if timeout == Some(0) {
                return Err(ConfigValidationError::InvalidTimeout(section));
            }
        }

        self.chat
            .default_model
            .to_model_spec()
            .map_err(|reason| ConfigValidationError::InvalidModel {
                field: "chat.default_model".to_string(),
                value: self.chat.default_model.model.clone().unwrap_or_default(),
                reason,
            })?;

        self.round_table_config().map(|_| ())
    }

    /// Build the round table setup described by `[round_table]` and `chat.rounds`.
    pub fn round_table_config(&self) -> Result<RoundTableConfig, ConfigValidationError> {
        let mut config = RoundTableConfig::default();

        for (i, raw) in self.round_table.participants.iter().enumerate() {
            let field = format!("round_table.participants[{}]", i);
            let model = parse_model(&field, &raw.model)?;
            let mut participant =
                Participant::new(&raw.name, model).map_err(ConfigValidationError::InvalidParticipant)?;
            if let Some(prompt) = &raw.system_prompt {
                participant = participant.with_system_prompt(prompt.clone());
            }
            if let Some(temperature) = raw.temperature {
                check_temperature(&field, temperature)?;
                participant = participant
                    .with_temperature(temperature)
                    .map_err(ConfigValidationError::InvalidParticipant)?;
            }
            config
                .add_participant(participant)
                .map_err(ConfigValidationError::InvalidParticipant)?;
        }

        if let Some(chairman) = &self.round_table.chairman {
            config.set_chairman(parse_model("round_table.chairman", chairman)?);
        }

        config
            .set_rounds(self.chat.rounds)
            .map_err(|_| ConfigValidationError::InvalidRounds)?;

        Ok(config)
    }

    /// Defaults for new sessions
    pub fn chat_defaults(&self) -> Result<ChatDefaults, ConfigValidationError> {
        self.validate()?;

        let model = self
            .chat
            .default_model
            .to_model_spec()
            .map_err(|reason| ConfigValidationError::InvalidModel {
                field: "chat.default_model".to_string(),
                value: self.chat.default_model.model.clone().unwrap_or_default(),
                reason,
            })?;

        Ok(ChatDefaults {
            mode: self.chat.mode,
            settings: ChatSettings {
                model,
                temperature: self.chat.temperature,
            },
            system: self
                .chat
                .system
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            round_table: self.round_table_config()?,
            autosave_min_messages: self.chat.autosave_min_messages,
        })
    }
}

fn check_temperature(field: &str, value: f32) -> Result<(), ConfigValidationError> {
    validate_temperature(value)
        .map(|_| ())
        .map_err(|_| ConfigValidationError::InvalidTemperature {
            field: field.to_string(),
            value,
        })
}

fn parse_model(field: &str, value: &str) -> Result<ModelSpec, ConfigValidationError> {
    value
        .parse::<ModelSpec>()
        .map_err(|e| ConfigValidationError::InvalidModel {
            field: field.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{ChatMode, OutputFormat, Provider};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[chat]
mode = "round_table"
temperature = 0.4
rounds = 2
system = "Be concise."

[chat.default_model]
provider = "openai"
model = "gpt-4o"

[round_table]
chairman = "anthropic:claude-3-7-sonnet-20250219"
participants = [
  { name = "Claude", model = "anthropic:claude-3-5-sonnet-20241022" },
  { name = "R1", model = "openrouter:deepseek/deepseek-r1", temperature = 0.6 },
]

[paths]
sessions_dir = "my_sessions"

[output]
format = "full"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/roundtable/history.txt"

[logging]
conversation_log = true
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.chat.mode, ChatMode::RoundTable);
        assert_eq!(config.paths.sessions_dir, "my_sessions");
        assert_eq!(config.paths.prompts_dir, "roundtable_prompts");
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert!(config.logging.conversation_log);

        let defaults = config.chat_defaults().unwrap();
        assert_eq!(defaults.system, "Be concise.");
        assert_eq!(defaults.settings.model.provider(), Provider::OpenAi);
        assert_eq!(defaults.round_table.participants().len(), 2);
        assert_eq!(defaults.round_table.rounds(), 2);
        assert_eq!(
            defaults.round_table.participants()[1].temperature,
            Some(0.6)
        );
        assert!(defaults.round_table.validate().is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.output.color);
        assert!(config.repl.show_progress);
        assert_eq!(config.paths.default_prompt.as_deref(), Some("code_guru.json"));

        let defaults = config.chat_defaults().unwrap();
        assert_eq!(defaults.system, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(defaults.settings.model.provider(), Provider::Anthropic);
        assert!(defaults.round_table.participants().is_empty());
    }

    #[test]
    fn test_validate_temperature_range() {
        let mut config = FileConfig::default();
        config.chat.temperature = 2.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTemperature { .. })
        ));
    }

    #[test]
    fn test_validate_rounds() {
        let mut config = FileConfig::default();
        config.chat.rounds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidRounds));
    }

    #[test]
    fn test_validate_duplicate_participants() {
        let toml_str = r#"
[round_table]
participants = [
  { name = "A", model = "openai:gpt-4o" },
  { name = "A", model = "openai:gpt-4o-mini" },
]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidParticipant(
                DomainError::DuplicateParticipant(_)
            ))
        ));
    }

    #[test]
    fn test_validate_bad_participant_model() {
        let toml_str = r#"
[round_table]
participants = [{ name = "A", model = "mistral:large" }]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("round_table.participants[0]"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = FileConfig::default();
        config.providers.openai.timeout_seconds = Some(0);
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout("providers.openai"))
        );
    }
}
