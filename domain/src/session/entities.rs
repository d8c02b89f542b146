//! Session domain entities

use crate::core::error::{DomainError, validate_temperature};
use crate::core::model::ModelSpec;
use crate::roundtable::RoundTableConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default sampling temperature for new sessions
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Distinguishes ordinary replies from chairman summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Chat,
    Summary,
}

/// A message in a session transcript (Entity)
///
/// Immutable once appended: [`Session`] only hands out shared references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Participant that produced the message (round table mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub kind: MessageKind,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            source: None,
            timestamp: Utc::now(),
            kind: MessageKind::Chat,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Reply from a named round table participant
    pub fn from_participant(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: Some(name.into()),
            ..Self::assistant(content)
        }
    }

    /// Chairman summary, attributed to the given label
    pub fn summary(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: Some(label.into()),
            kind: MessageKind::Summary,
            ..Self::assistant(content)
        }
    }

    pub fn is_summary(&self) -> bool {
        self.kind == MessageKind::Summary
    }
}

/// Chat mode of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// Single model answers each user message
    #[default]
    #[serde(alias = "Standard Chat")]
    Standard,
    /// Participants take turns, chairman summarizes
    #[serde(alias = "Round Table")]
    RoundTable,
}

impl ChatMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            ChatMode::Standard => "Standard Chat",
            ChatMode::RoundTable => "Round Table",
        }
    }
}

impl std::fmt::Display for ChatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for ChatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "standard" | "standard_chat" | "chat" => Ok(ChatMode::Standard),
            "round_table" | "roundtable" | "rt" => Ok(ChatMode::RoundTable),
            other => Err(format!("unknown chat mode: {}", other)),
        }
    }
}

/// Provider/model selection and sampling for standard mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    pub model: ModelSpec,
    pub temperature: f32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: ModelSpec::default(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// A chat session: metadata plus an append-only transcript (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    title: String,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    /// System prompt shared by all calls in this session
    #[serde(default)]
    pub system: String,
    #[serde(default)]
    pub mode: ChatMode,
    #[serde(default)]
    pub settings: ChatSettings,
    #[serde(default)]
    pub round_table: RoundTableConfig,
    #[serde(default)]
    history: Vec<Message>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new("")
    }
}

impl Session {
    /// Create an empty session with the given system prompt
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            created_at: Utc::now(),
            system: system.into(),
            mode: ChatMode::default(),
            settings: ChatSettings::default(),
            round_table: RoundTableConfig::default(),
            history: Vec::new(),
        }
    }

    /// A fresh session that keeps this one's system prompt, settings and
    /// round table configuration but none of its history.
    pub fn cleared(&self) -> Self {
        Self {
            system: self.system.clone(),
            mode: self.mode,
            settings: self.settings.clone(),
            round_table: self.round_table.clone(),
            ..Self::new("")
        }
    }

    /// Title, derived from the first user message when the file carries none
    pub fn title(&self) -> String {
        if !self.title.is_empty() {
            return self.title.clone();
        }
        self.history
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| crate::core::string::preview(&m.content, 48))
            .unwrap_or_else(|| "Untitled session".to_string())
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn messages(&self) -> &[Message] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Alias kept for readability at call sites that ask "anything to save?"
    pub fn has_content(&self) -> bool {
        !self.is_empty()
    }

    /// Append a message to the transcript.
    ///
    /// Rejects empty content. Never touches previously appended messages.
    pub fn push(&mut self, message: Message) -> Result<&Message, DomainError> {
        if message.content.trim().is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        self.history.push(message);
        Ok(&self.history[self.history.len() - 1])
    }

    /// Set the standard-mode temperature
    pub fn set_temperature(&mut self, temperature: f32) -> Result<(), DomainError> {
        self.settings.temperature = validate_temperature(temperature)?;
        Ok(())
    }

    /// Switch chat mode.
    ///
    /// Switching to a different mode with a non-empty history starts a fresh
    /// session (keeping system prompt and configuration). Returns `true` when
    /// history was cleared.
    pub fn switch_mode(&mut self, mode: ChatMode) -> bool {
        if self.mode == mode {
            return false;
        }
        let had_history = self.has_content();
        if had_history {
            *self = self.cleared();
        }
        self.mode = mode;
        had_history
    }

    /// Check conversational shape: the first message comes from the user and
    /// no two user messages are adjacent. Several assistant messages in a
    /// row are allowed (round table replies).
    pub fn is_well_formed(&self) -> bool {
        let Some(first) = self.history.first() else {
            return true;
        };
        if first.role != Role::User {
            return false;
        }
        self.history
            .windows(2)
            .all(|w| !(w[0].role == Role::User && w[1].role == Role::User))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::Provider;

    #[test]
    fn test_push_rejects_empty_content() {
        let mut session = Session::new("sys");
        assert_eq!(
            session.push(Message::user("  ")).unwrap_err(),
            DomainError::EmptyMessage
        );
        assert!(session.is_empty());
    }

    #[test]
    fn test_append_never_mutates_prior_messages() {
        let mut session = Session::new("sys");
        session.push(Message::user("first")).unwrap();
        session.push(Message::assistant("second")).unwrap();
        let snapshot: Vec<Message> = session.messages().to_vec();

        session.push(Message::user("third")).unwrap();
        session
            .push(Message::from_participant("Claude", "fourth"))
            .unwrap();

        assert_eq!(session.len(), 4);
        assert_eq!(&session.messages()[..2], snapshot.as_slice());
        assert_eq!(session.messages()[2].content, "third");
        assert_eq!(session.messages()[3].source.as_deref(), Some("Claude"));
    }

    #[test]
    fn test_title_falls_back_to_first_user_message() {
        let mut session = Session::new("");
        assert_eq!(session.title(), "Untitled session");
        session.push(Message::user("How do\nlifetimes work?")).unwrap();
        assert_eq!(session.title(), "How do lifetimes work?");

        let titled: Session = serde_json::from_str(r#"{"title": "Lifetimes"}"#).unwrap();
        assert_eq!(titled.title(), "Lifetimes");
    }

    #[test]
    fn test_switch_mode_clears_history_but_keeps_configuration() {
        let mut session = Session::new("be terse");
        session.settings.model = ModelSpec::default_for(Provider::OpenAi);
        session.push(Message::user("hi")).unwrap();
        session.push(Message::assistant("hello")).unwrap();

        assert!(session.switch_mode(ChatMode::RoundTable));
        assert!(session.is_empty());
        assert_eq!(session.mode, ChatMode::RoundTable);
        assert_eq!(session.system, "be terse");
        assert_eq!(session.settings.model.provider(), Provider::OpenAi);

        assert!(!session.switch_mode(ChatMode::RoundTable));
    }

    #[test]
    fn test_switch_mode_without_history_only_changes_mode() {
        let mut session = Session::new("");
        assert!(!session.switch_mode(ChatMode::RoundTable));
        assert_eq!(session.mode, ChatMode::RoundTable);
    }

    #[test]
    fn test_well_formed_allows_consecutive_assistants() {
        let mut session = Session::new("");
        session.push(Message::user("q")).unwrap();
        session.push(Message::from_participant("A", "a")).unwrap();
        session.push(Message::from_participant("B", "b")).unwrap();
        session.push(Message::summary("Chairman (x)", "s")).unwrap();
        assert!(session.is_well_formed());

        session.push(Message::user("q2")).unwrap();
        session.push(Message::user("q3")).unwrap();
        assert!(!session.is_well_formed());
    }

    #[test]
    fn test_set_temperature_validates_range() {
        let mut session = Session::new("");
        session.set_temperature(1.3).unwrap();
        assert_eq!(session.settings.temperature, 1.3);
        assert!(session.set_temperature(3.0).is_err());
        assert_eq!(session.settings.temperature, 1.3);
    }

    #[test]
    fn test_json_round_trip_is_lossless() {
        let mut session = Session::new("You are helpful.");
        session.mode = ChatMode::RoundTable;
        session.push(Message::user("What is ownership?")).unwrap();
        session
            .push(Message::from_participant("Claude", "A set of rules."))
            .unwrap();
        session
            .push(Message::summary("Chairman (gpt-4o)", "Summary."))
            .unwrap();

        let json = serde_json::to_string_pretty(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn test_legacy_session_without_mode_loads_as_standard() {
        let json = r#"{
            "system": "You are helpful.",
            "history": [
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"}
            ]
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.mode, ChatMode::Standard);
        assert!(session.round_table.participants().is_empty());
        assert_eq!(session.len(), 2);
        assert_eq!(session.messages()[1].kind, MessageKind::Chat);
    }

    #[test]
    fn test_loads_round_table_session_with_display_mode_names() {
        let json = r#"{
            "system": "You are helpful.",
            "history": [
                {"role": "user", "content": "What is ownership?"},
                {"role": "assistant", "content": "Rules.", "source": "Sonnet"},
                {"role": "assistant", "content": "In short...", "source": "Chairman (gpt-4o)"}
            ],
            "round_table": {
                "enabled": true,
                "models": {"Sonnet": ["Anthropic", "claude-3-5-sonnet-20241022"]},
                "chairman_model": ["OpenAI", "gpt-4o"]
            },
            "mode": "Round Table"
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.mode, ChatMode::RoundTable);
        assert_eq!(session.round_table.participants()[0].name, "Sonnet");
        assert_eq!(
            session.round_table.chairman_label().as_deref(),
            Some("Chairman (gpt-4o)")
        );
        assert_eq!(session.len(), 3);
        assert!(session.round_table.validate().is_ok());

        let standard: Session =
            serde_json::from_str(r#"{"mode": "Standard Chat", "history": []}"#).unwrap();
        assert_eq!(standard.mode, ChatMode::Standard);
    }

    #[test]
    fn test_chat_mode_parse() {
        assert_eq!("Round Table".parse::<ChatMode>(), Ok(ChatMode::RoundTable));
        assert_eq!("standard".parse::<ChatMode>(), Ok(ChatMode::Standard));
        assert!("debate".parse::<ChatMode>().is_err());
    }
}
